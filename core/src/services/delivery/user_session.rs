//! Delivery through an interactive user session

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::backend::DeliveryBackend;
use super::outcome::DeliveryOutcome;
use crate::errors::DeliveryError;

/// Client for an already logged-in user account
#[async_trait]
pub trait UserSessionClient: Send + Sync {
    /// Whether the session is connected and authorized
    fn is_initialized(&self) -> bool;

    /// Send `text` to `recipient_id`, returning the sent message description
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<Value, DeliveryError>;
}

/// Adapts a [`UserSessionClient`] to the [`DeliveryBackend`] seam
pub struct UserSessionBackend {
    client: Arc<dyn UserSessionClient>,
}

impl UserSessionBackend {
    pub fn new(client: Arc<dyn UserSessionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryBackend for UserSessionBackend {
    fn name(&self) -> &'static str {
        "user_session"
    }

    async fn send(&self, recipient_id: &str, text: &str) -> Result<DeliveryOutcome, DeliveryError> {
        if !self.client.is_initialized() {
            return Err(DeliveryError::NotInitialized(
                "user session is not connected".to_string(),
            ));
        }

        let message = self.client.send_message(recipient_id, text).await?;
        Ok(DeliveryOutcome::new(
            200,
            json!({
                "ok": true,
                "via": "user_session",
                "result": message,
            }),
        ))
    }
}
