//! Verification code lifetime configuration

use serde::{Deserialize, Serialize};

use super::{parse_seconds, ConfigError, Lookup};

/// Default code lifetime (5 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 300;

/// Verification code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a pending code stays valid after issuance
    pub code_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
        }
    }
}

impl VerificationConfig {
    /// Load from `CODE_TTL_SECONDS`
    ///
    /// Zero or anything above `MAX_DURATION_SECONDS` is rejected.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            code_ttl_seconds: parse_seconds(lookup, "CODE_TTL_SECONDS", DEFAULT_CODE_TTL_SECONDS)?,
        })
    }
}
