//! Shared-secret configuration for the `X-Auth-Token` header check

use serde::{Deserialize, Serialize};

use super::{read_raw, Lookup};

/// Header checked against the shared secret
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Shared-secret configuration
///
/// An absent secret disables the header check entirely.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Expected `X-Auth-Token` value, kept byte for byte
    ///
    /// Unlike other settings the secret is not trimmed; a blank value
    /// disables the check.
    #[serde(default, skip_serializing)]
    pub shared_secret: Option<String>,
}

impl AuthConfig {
    /// Load from `AUTH_TOKEN`
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            shared_secret: read_raw(lookup, "AUTH_TOKEN"),
        }
    }

    /// Whether incoming requests must carry the header
    pub fn is_enabled(&self) -> bool {
        self.shared_secret.is_some()
    }
}
