//! Delivery backend configuration

use serde::{Deserialize, Serialize};

use super::{parse_flag, parse_var, read_var, ConfigError, Lookup};

/// Default Telegram bot API base URL
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default outbound delivery timeout
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Delivery backend configuration
///
/// Which backend is actually used is decided once at startup:
/// an initialized user session wins, then dry-run (explicit or because no
/// bot token is set), then the bot API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Telegram bot token
    #[serde(default, skip_serializing)]
    pub bot_token: Option<String>,

    /// Telegram bot API base URL
    pub telegram_api_base: String,

    /// Base URL of a logged-in user-session gateway
    #[serde(default)]
    pub session_gateway_url: Option<String>,

    /// Session name passed to the gateway
    pub session_name: String,

    /// Skip real delivery and echo the code back
    #[serde(default)]
    pub dry_run: bool,

    /// Outbound delivery timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            session_gateway_url: None,
            session_name: String::from("session"),
            dry_run: false,
            timeout_secs: DEFAULT_DELIVERY_TIMEOUT_SECS,
        }
    }
}

impl DeliveryConfig {
    /// Load delivery settings
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bot_token: read_var(lookup, "TELEGRAM_BOT_TOKEN"),
            telegram_api_base: read_var(lookup, "TELEGRAM_API_BASE")
                .unwrap_or(defaults.telegram_api_base),
            session_gateway_url: read_var(lookup, "SESSION_GATEWAY_URL"),
            session_name: read_var(lookup, "SESSION_NAME").unwrap_or(defaults.session_name),
            dry_run: parse_flag(lookup, "DRY_RUN", false)?,
            timeout_secs: parse_var(lookup, "DELIVERY_TIMEOUT_SECS", defaults.timeout_secs)?,
        })
    }

    /// Whether a bot credential is available
    pub fn has_bot_token(&self) -> bool {
        self.bot_token.is_some()
    }
}
