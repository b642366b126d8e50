//! Delivery transports
//!
//! ## Features
//!
//! - **Telegram bot API**: `sendMessage` over HTTPS with the bot token
//! - **User-session gateway**: HTTP client for a logged-in user account
//! - **Security**: bot tokens never appear in logs or error messages

mod session_gateway;
mod telegram_bot;

#[cfg(test)]
mod tests;

pub use session_gateway::SessionGatewayClient;
pub use telegram_bot::TelegramBotBackend;

use serde_json::{json, Value};
use vg_core::DeliveryError;

/// Translate a reqwest failure into a delivery error
///
/// The URL is stripped first since it may carry the bot token.
pub(crate) fn transport_error(error: reqwest::Error, timeout_secs: u64) -> DeliveryError {
    if error.is_timeout() {
        return DeliveryError::Timeout {
            seconds: timeout_secs,
        };
    }
    DeliveryError::Transport(error.without_url().to_string())
}

/// Parse a response body as JSON, wrapping non-JSON text as `{"text": ...}`
pub(crate) fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or_else(|_| json!({ "text": text }))
}
