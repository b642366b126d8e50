//! HTTP client for a logged-in user-session gateway
//!
//! The gateway owns the interactive Telegram login; this client only checks
//! that the named session is authorized and asks it to send messages.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, warn};

use vg_core::{DeliveryError, UserSessionClient};
use vg_shared::{mask_recipient, DeliveryConfig};

use super::{parse_body, transport_error};
use crate::InfrastructureError;

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    recipient: &'a str,
    text: &'a str,
}

/// User-session client talking to a gateway over HTTP
#[derive(Debug)]
pub struct SessionGatewayClient {
    http: reqwest::Client,
    base_url: String,
    session: String,
    timeout_secs: u64,
    initialized: AtomicBool,
}

impl SessionGatewayClient {
    pub fn new(
        base_url: impl Into<String>,
        session: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: session.into(),
            timeout_secs: timeout.as_secs(),
            initialized: AtomicBool::new(false),
        })
    }

    /// Build from configuration; `None` when no gateway URL is configured
    pub fn from_config(config: &DeliveryConfig) -> Result<Option<Self>, InfrastructureError> {
        let Some(url) = &config.session_gateway_url else {
            return Ok(None);
        };
        Self::new(
            url.clone(),
            config.session_name.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    /// Ask the gateway whether the session is authorized
    ///
    /// Any failure leaves the client uninitialized. Returns the new state.
    pub async fn connect(&self) -> bool {
        let url = format!("{}/sessions/{}", self.base_url, self.session);
        let authorized = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => body["authorized"].as_bool().unwrap_or(false),
                    Err(e) => {
                        warn!(error = %e, "Unreadable session gateway status");
                        false
                    }
                }
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Session gateway rejected status check");
                false
            }
            Err(e) => {
                warn!(error = %e.without_url(), "Session gateway unreachable");
                false
            }
        };

        self.initialized.store(authorized, Ordering::Release);
        info!(
            session = %self.session,
            authorized,
            "User session status checked"
        );
        authorized
    }
}

#[async_trait]
impl UserSessionClient for SessionGatewayClient {
    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<Value, DeliveryError> {
        let url = format!("{}/sessions/{}/messages", self.base_url, self.session);
        let response = self
            .http
            .post(&url)
            .json(&SendMessageRequest {
                recipient: recipient_id,
                text,
            })
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        let body = parse_body(
            response
                .text()
                .await
                .map_err(|e| transport_error(e, self.timeout_secs))?,
        );

        if !status.is_success() {
            warn!(
                recipient = %mask_recipient(recipient_id),
                status = status.as_u16(),
                "Session gateway refused message"
            );
            return Err(DeliveryError::Transport(format!(
                "session gateway answered {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(body)
    }
}
