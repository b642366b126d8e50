//! Domain-specific error types and error handling.

mod types;


// Re-export transport and persistence error types
pub use types::{DeliveryError, PersistenceError};

use thiserror::Error;

/// Errors surfaced to clients by the verification service
///
/// Every variant maps to a distinct client-facing response; none is retried
/// internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid auth token")]
    Auth,

    #[error("Missing or empty field: {field}")]
    Validation { field: String },

    #[error("Too many code requests ({count} in the last {window_seconds}s, limit {limit})")]
    RateLimited {
        count: usize,
        limit: usize,
        window_seconds: u64,
        retry_after_seconds: u64,
    },

    #[error("No pending verification code for this recipient")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    #[error("Verification code does not match")]
    Mismatch,

    #[error("Server misconfigured: {message}")]
    Config { message: String },
}

impl DomainError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Auth => "invalid_auth_token",
            DomainError::Validation { .. } => "validation_error",
            DomainError::RateLimited { .. } => "rate_limited",
            DomainError::NotFound => "not_found",
            DomainError::Expired => "expired",
            DomainError::Mismatch => "mismatch",
            DomainError::Config { .. } => "misconfigured",
        }
    }

    /// Shorthand for a missing-field validation error
    pub fn missing(field: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
