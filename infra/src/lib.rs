//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Verigram. It provides
//! concrete implementations of the seams defined in `vg_core`:
//!
//! - **Persistence**: JSON snapshot file behind `SnapshotStore`
//! - **Delivery**: Telegram bot API backend and a user-session gateway client

pub mod delivery;
pub mod persistence;

pub use delivery::{SessionGatewayClient, TelegramBotBackend};
pub use persistence::JsonFileSnapshotStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
