//! Delivery backend trait

use async_trait::async_trait;

use super::outcome::DeliveryOutcome;
use crate::errors::DeliveryError;

/// Transport able to deliver a text message to a recipient
///
/// A backend reports whatever status its upstream answered with, non-2xx
/// included; `Err` is reserved for failures to obtain an answer at all.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    /// Short name used in logs and failure bodies
    fn name(&self) -> &'static str;

    /// Send `text` to `recipient_id`
    async fn send(&self, recipient_id: &str, text: &str) -> Result<DeliveryOutcome, DeliveryError>;
}
