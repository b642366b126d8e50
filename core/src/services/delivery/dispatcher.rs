//! Backend selection and result normalization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use vg_shared::mask_recipient;

use super::backend::DeliveryBackend;
use super::dry_run::DryRunBackend;
use super::outcome::DeliveryOutcome;
use super::user_session::{UserSessionBackend, UserSessionClient};
use crate::errors::DeliveryError;

/// Delivery strategy chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    UserSession,
    DryRun,
    BotApi,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::UserSession => "user_session",
            DeliveryMode::DryRun => "dry_run",
            DeliveryMode::BotApi => "bot_api",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sends messages through the backend selected at startup
///
/// `send` never fails: transport errors become a 502 outcome and timeouts a
/// 504 outcome.
pub struct DeliveryDispatcher {
    backend: Arc<dyn DeliveryBackend>,
    mode: DeliveryMode,
    timeout: Duration,
    /// False when dry-run was only reached because nothing else is configured
    usable: bool,
}

impl DeliveryDispatcher {
    /// Pick the delivery strategy
    ///
    /// An initialized user session wins. Otherwise dry-run is used when it was
    /// requested or when no bot backend exists, and the bot backend last.
    pub fn select(
        session: Option<Arc<dyn UserSessionClient>>,
        dry_run: bool,
        bot: Option<Arc<dyn DeliveryBackend>>,
        timeout: Duration,
    ) -> Self {
        if let Some(client) = session {
            if client.is_initialized() {
                info!(mode = "user_session", "Delivery backend selected");
                return Self::new(
                    DeliveryMode::UserSession,
                    Arc::new(UserSessionBackend::new(client)),
                    timeout,
                );
            }
            warn!("User session configured but not initialized, falling back");
        }

        match bot {
            Some(bot) if !dry_run => {
                info!(mode = "bot_api", backend = bot.name(), "Delivery backend selected");
                Self::new(DeliveryMode::BotApi, bot, timeout)
            }
            _ => {
                if dry_run {
                    info!(mode = "dry_run", "Delivery backend selected");
                } else {
                    warn!(
                        mode = "dry_run",
                        "No delivery credentials configured, code requests will be refused"
                    );
                }
                Self {
                    backend: Arc::new(DryRunBackend),
                    mode: DeliveryMode::DryRun,
                    timeout,
                    usable: dry_run,
                }
            }
        }
    }

    /// Dispatcher over an explicit backend
    pub fn new(mode: DeliveryMode, backend: Arc<dyn DeliveryBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            mode,
            timeout,
            usable: true,
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Whether a real backend or an explicit dry-run was configured
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    /// Deliver `text` to `recipient_id`
    pub async fn send(&self, recipient_id: &str, text: &str) -> DeliveryOutcome {
        let name = self.backend.name();
        let recipient = mask_recipient(recipient_id);

        let result = tokio::time::timeout(self.timeout, self.backend.send(recipient_id, text)).await;

        let outcome = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(DeliveryError::Timeout { seconds })) => {
                warn!(recipient = %recipient, backend = name, seconds, "Delivery transport timed out");
                DeliveryOutcome::timed_out(name, seconds)
            }
            Ok(Err(e)) => {
                error!(
                    recipient = %recipient,
                    backend = name,
                    error = %e,
                    error_code = e.code(),
                    event = "delivery_failed",
                    "Delivery failed"
                );
                DeliveryOutcome::failed(name, e.to_string())
            }
            Err(_) => {
                let seconds = self.timeout.as_secs();
                warn!(
                    recipient = %recipient,
                    backend = name,
                    seconds,
                    event = "delivery_timeout",
                    "Delivery timed out"
                );
                DeliveryOutcome::timed_out(name, seconds)
            }
        };

        info!(
            recipient = %recipient,
            backend = name,
            status = outcome.status_code,
            event = "delivery_attempted",
            "Delivery attempted"
        );
        outcome
    }
}
