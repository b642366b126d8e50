//! Backend that never leaves the process

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use vg_shared::mask_recipient;

use super::backend::DeliveryBackend;
use super::outcome::DeliveryOutcome;
use crate::errors::DeliveryError;

/// Synthesizes a successful delivery without any network call
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunBackend;

#[async_trait]
impl DeliveryBackend for DryRunBackend {
    fn name(&self) -> &'static str {
        "dry_run"
    }

    async fn send(&self, recipient_id: &str, text: &str) -> Result<DeliveryOutcome, DeliveryError> {
        info!(
            recipient = %mask_recipient(recipient_id),
            event = "dry_run_delivery",
            "Dry run: message not sent"
        );
        debug!(text, "Dry run message body");

        Ok(DeliveryOutcome::new(
            200,
            json!({
                "ok": true,
                "dry_run": true,
                "recipient": recipient_id,
                "text": text,
            }),
        ))
    }
}
