//! Verification service module
//!
//! This module implements the code lifecycle on top of the lower-level
//! services:
//! - Shared-secret gating of every operation
//! - Code requests: rate limiting, generation, storage and delivery
//! - Code verification with lazy expiry and one-time consumption

mod config;
mod gate;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use gate::SharedSecretGate;
pub use service::VerificationService;
pub use types::{RequestCodeCommand, RequestCodeResult, VerifyCodeCommand};
