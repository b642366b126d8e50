//! Normalized delivery result

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Status code and response body reported by a delivery attempt
///
/// Transport failures are folded into this type as well (502 or 504), so
/// callers only ever inspect the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub status_code: u16,
    pub body: Value,
}

impl DeliveryOutcome {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// Whether the backend reported a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// 502 outcome for a failed transport
    pub fn failed(backend: &str, message: impl Into<String>) -> Self {
        Self::new(
            502,
            json!({
                "ok": false,
                "error": "delivery_failed",
                "backend": backend,
                "message": message.into(),
            }),
        )
    }

    /// 504 outcome for a transport that did not answer in time
    pub fn timed_out(backend: &str, seconds: u64) -> Self {
        Self::new(
            504,
            json!({
                "ok": false,
                "error": "delivery_timeout",
                "backend": backend,
                "message": format!("Delivery timed out after {}s", seconds),
            }),
        )
    }
}
