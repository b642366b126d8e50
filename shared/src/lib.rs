//! Shared utilities and common types for the Verigram server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Log-safe masking of recipient identifiers

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DeliveryConfig, Environment, LogFormat, LoggingConfig,
    PersistenceConfig, RateLimitConfig, ServerConfig, VerificationConfig,
};
pub use utils::mask_recipient;
