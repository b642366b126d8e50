//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Shared-secret header check
//! - `delivery` - Telegram bot / user-session gateway / dry-run settings
//! - `environment` - Environment detection and logging configuration
//! - `persistence` - Snapshot file location
//! - `rate_limit` - Per-recipient request-code limits
//! - `server` - HTTP bind address and workers
//! - `verification` - Code lifetime
//!
//! Every loader reads through a lookup closure so that tests can feed a plain
//! map instead of touching the process environment.

pub mod auth;
pub mod delivery;
pub mod environment;
pub mod persistence;
pub mod rate_limit;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use auth::AuthConfig;
pub use delivery::DeliveryConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use persistence::PersistenceConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Variable lookup used by all loaders
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Delivery backend configuration
    pub delivery: DeliveryConfig,

    /// Shared-secret configuration
    pub auth: AuthConfig,

    /// Code lifetime configuration
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Snapshot persistence configuration
    pub persistence: PersistenceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            delivery: DeliveryConfig::from_lookup(lookup)?,
            auth: AuthConfig::from_lookup(lookup),
            verification: VerificationConfig::from_lookup(lookup)?,
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
            persistence: PersistenceConfig::from_lookup(lookup),
            logging: LoggingConfig::from_lookup(lookup, environment)?,
        })
    }
}

/// Read a variable, treating blank values as unset
pub(crate) fn read_var(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable verbatim, treating blank values as unset
///
/// Used for secrets, where surrounding whitespace is part of the value.
pub(crate) fn read_raw(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Longest duration accepted for second-valued settings (10 years)
pub const MAX_DURATION_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Parse a duration in whole seconds within `1..=MAX_DURATION_SECONDS`
pub(crate) fn parse_seconds(lookup: Lookup<'_>, key: &str, default: u64) -> Result<u64, ConfigError> {
    let seconds = parse_var(lookup, key, default)?;
    if seconds == 0 || seconds > MAX_DURATION_SECONDS {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: seconds.to_string(),
            reason: format!("expected 1..={} seconds", MAX_DURATION_SECONDS),
        });
    }
    Ok(seconds)
}

/// Parse a variable with `FromStr`, falling back to `default` when unset
pub(crate) fn parse_var<T>(lookup: Lookup<'_>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match read_var(lookup, key) {
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse a boolean flag (`1/true/yes/on`, `0/false/no/off`)
pub(crate) fn parse_flag(lookup: Lookup<'_>, key: &str, default: bool) -> Result<bool, ConfigError> {
    match read_var(lookup, key) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
                reason: "expected a boolean".to_string(),
            }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let lookup = lookup_from(&[]);
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.verification.code_ttl_seconds, 300);
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window_seconds, 900);
        assert!(!config.delivery.dry_run);
        assert!(config.delivery.bot_token.is_none());
        assert!(config.auth.shared_secret.is_none());
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_full_environment() {
        let lookup = lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("AUTH_TOKEN", "secret"),
            ("CODE_TTL_SECONDS", "60"),
            ("RATE_LIMIT_COUNT", "5"),
            ("RATE_LIMIT_WINDOW_SECONDS", "120"),
            ("DRY_RUN", "yes"),
            ("STORE_PATH", "/tmp/codes.json"),
            ("SERVER_PORT", "8081"),
        ]);
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.delivery.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.auth.shared_secret.as_deref(), Some("secret"));
        assert_eq!(config.verification.code_ttl_seconds, 60);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_seconds, 120);
        assert!(config.delivery.dry_run);
        assert_eq!(config.persistence.path.to_str(), Some("/tmp/codes.json"));
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let lookup = lookup_from(&[("AUTH_TOKEN", "   "), ("TELEGRAM_BOT_TOKEN", "")]);
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert!(config.auth.shared_secret.is_none());
        assert!(config.delivery.bot_token.is_none());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let lookup = lookup_from(&[("CODE_TTL_SECONDS", "five minutes")]);
        let err = AppConfig::from_lookup(&lookup).unwrap_err();

        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "CODE_TTL_SECONDS"),
        }
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        for (key, value) in [
            ("CODE_TTL_SECONDS", "0"),
            ("CODE_TTL_SECONDS", "100000000000000"),
            ("CODE_TTL_SECONDS", "18446744073709551615"),
            ("RATE_LIMIT_WINDOW_SECONDS", "0"),
            ("RATE_LIMIT_WINDOW_SECONDS", "10000000000000"),
        ] {
            let lookup = lookup_from(&[(key, value)]);
            match AppConfig::from_lookup(&lookup).unwrap_err() {
                ConfigError::InvalidValue { key: rejected, .. } => assert_eq!(rejected, key),
            }
        }
    }

    #[test]
    fn test_longest_duration_is_accepted() {
        let max = MAX_DURATION_SECONDS.to_string();
        let lookup = lookup_from(&[
            ("CODE_TTL_SECONDS", max.as_str()),
            ("RATE_LIMIT_WINDOW_SECONDS", max.as_str()),
        ]);
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.verification.code_ttl_seconds, MAX_DURATION_SECONDS);
        assert_eq!(config.rate_limit.window_seconds, MAX_DURATION_SECONDS);
    }

    #[test]
    fn test_auth_token_is_not_trimmed() {
        let lookup = lookup_from(&[("AUTH_TOKEN", " s3cret\t")]);
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.auth.shared_secret.as_deref(), Some(" s3cret\t"));
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let lookup = lookup_from(&[("DRY_RUN", "maybe")]);
        assert!(AppConfig::from_lookup(&lookup).is_err());
    }
}
