//! Telegram bot API delivery backend

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use vg_core::{DeliveryBackend, DeliveryError, DeliveryOutcome};
use vg_shared::{mask_recipient, DeliveryConfig};

use super::{parse_body, transport_error};
use crate::InfrastructureError;

/// Sends messages with a bot token through the Telegram bot API
///
/// Whatever status Telegram answers with is passed through, so a 400 for an
/// unknown chat reaches the caller as a 400 outcome.
pub struct TelegramBotBackend {
    http: reqwest::Client,
    api_base: String,
    token: String,
    timeout_secs: u64,
}

impl TelegramBotBackend {
    /// Create a backend for `token` against `api_base`
    pub fn new(
        token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(InfrastructureError::Config("bot token is empty".to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_base = api_base.into().trim_end_matches('/').to_string();

        info!(api_base = %api_base, "Telegram bot backend initialized");

        Ok(Self {
            http,
            api_base,
            token,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Build from configuration; `None` when no bot token is configured
    pub fn from_config(config: &DeliveryConfig) -> Result<Option<Self>, InfrastructureError> {
        let Some(token) = &config.bot_token else {
            return Ok(None);
        };
        Self::new(
            token.clone(),
            config.telegram_api_base.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Call `sendMessage` with a form-encoded `chat_id` and `text`
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<DeliveryOutcome, DeliveryError> {
        let response = self
            .http
            .post(self.endpoint("sendMessage"))
            .form(&[("chat_id", chat_id), ("text", text)])
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        debug!(
            chat = %mask_recipient(chat_id),
            status,
            "Telegram sendMessage answered"
        );

        Ok(DeliveryOutcome::new(status, parse_body(text)))
    }
}

impl fmt::Debug for TelegramBotBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramBotBackend")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DeliveryBackend for TelegramBotBackend {
    fn name(&self) -> &'static str {
        "telegram_bot"
    }

    async fn send(&self, recipient_id: &str, text: &str) -> Result<DeliveryOutcome, DeliveryError> {
        self.send_message(recipient_id, text).await
    }
}
