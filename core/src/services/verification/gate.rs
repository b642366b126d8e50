//! Shared-secret check for incoming requests

use constant_time_eq::constant_time_eq;
use std::fmt;

use vg_shared::AuthConfig;

use crate::errors::{DomainError, DomainResult};

/// Compares a presented token against the configured shared secret
///
/// Without a secret every request passes.
#[derive(Clone, Default)]
pub struct SharedSecretGate {
    secret: Option<String>,
}

impl SharedSecretGate {
    /// Gate requiring `secret`; a blank secret disables the check
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Gate that lets everything through
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.shared_secret.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Reject unless `presented` equals the secret
    pub fn check(&self, presented: Option<&str>) -> DomainResult<()> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };

        let presented = presented.unwrap_or_default();
        if constant_time_eq(presented.as_bytes(), secret.as_bytes()) {
            Ok(())
        } else {
            Err(DomainError::Auth)
        }
    }
}

impl fmt::Debug for SharedSecretGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecretGate")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
