//! Error types for the delivery and persistence seams
//!
//! Neither of these ever reaches a client: delivery errors are converted into
//! a result value at the dispatcher boundary, and persistence errors are
//! logged by the code store when a background flush fails.

use thiserror::Error;

/// Failure of an outbound delivery transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Delivery timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Backend not initialized: {0}")]
    NotInitialized(String),

    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl DeliveryError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DeliveryError::Transport(_) => "delivery_failed",
            DeliveryError::Timeout { .. } => "delivery_timeout",
            DeliveryError::NotInitialized(_) => "delivery_unavailable",
            DeliveryError::InvalidResponse(_) => "delivery_invalid_response",
        }
    }
}

/// Failure reading or writing the code store snapshot
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}
