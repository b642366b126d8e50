//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::{parse_seconds, parse_var, ConfigError, Lookup};

/// Default number of code requests admitted per window
pub const DEFAULT_MAX_REQUESTS: usize = 3;

/// Default sliding window length (15 minutes)
pub const DEFAULT_WINDOW_SECONDS: u64 = 900;

/// Per-recipient request-code limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Max code requests per recipient inside the window
    pub max_requests: usize,

    /// Sliding window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_COUNT` and `RATE_LIMIT_WINDOW_SECONDS`
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            max_requests: parse_var(lookup, "RATE_LIMIT_COUNT", DEFAULT_MAX_REQUESTS)?,
            window_seconds: parse_seconds(lookup, "RATE_LIMIT_WINDOW_SECONDS", DEFAULT_WINDOW_SECONDS)?,
        })
    }
}
