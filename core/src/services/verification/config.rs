//! Configuration for the verification service

use chrono::Duration;

use vg_shared::{config::verification::DEFAULT_CODE_TTL_SECONDS, VerificationConfig};

use crate::services::clock::bounded_seconds;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// How long an issued code stays valid
    pub code_ttl: Duration,
}

impl VerificationServiceConfig {
    /// TTL from configuration, capped at `MAX_DURATION_SECONDS`
    pub fn from_config(config: &VerificationConfig) -> Self {
        Self {
            code_ttl: bounded_seconds(config.code_ttl_seconds),
        }
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl: bounded_seconds(DEFAULT_CODE_TTL_SECONDS),
        }
    }
}
