//! Outbound delivery of verification codes
//!
//! This module provides the delivery seam used by the verification service:
//! - `DeliveryBackend` trait implemented by every transport
//! - `UserSessionBackend` adapting an interactive user-session client
//! - `DryRunBackend` that synthesizes a success without any network call
//! - `DeliveryDispatcher` that picks one backend at startup and normalizes
//!   every result, failures included, into a `DeliveryOutcome`

mod backend;
mod dispatcher;
mod dry_run;
mod outcome;
mod user_session;

#[cfg(test)]
mod tests;

pub use backend::DeliveryBackend;
pub use dispatcher::{DeliveryDispatcher, DeliveryMode};
pub use dry_run::DryRunBackend;
pub use outcome::DeliveryOutcome;
pub use user_session::{UserSessionBackend, UserSessionClient};

/// Text of the message carrying a verification code
pub fn verification_message(code: &str) -> String {
    format!("Your verification code is: {}", code)
}
