//! # Verigram Core
//!
//! Core business logic for the Verigram verification-code service.
//! This crate contains the pending-code entity, the error taxonomy, and the
//! services that implement the code lifecycle: rate limiting, generation,
//! storage with snapshot persistence, delivery dispatch and verification.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
