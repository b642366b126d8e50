//! Bodies of the code endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use vg_core::{DeliveryOutcome, RequestCodeResult};

/// Body of `POST /request_code`
///
/// Every field is optional; missing values are reported by the service so
/// that the auth check always comes first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    /// Chat id, phone number or @username
    #[serde(default, alias = "recipient_id", alias = "chat_id", deserialize_with = "lenient_string")]
    pub recipient_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub credential: Option<String>,
}

/// Body of `POST /verify_code`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[serde(default, alias = "recipient_id", alias = "chat_id", deserialize_with = "lenient_string")]
    pub recipient_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeResponse {
    pub ok: bool,
    /// Whether the delivery backend accepted the message
    pub sent: bool,
    pub expires_at: DateTime<Utc>,
    pub delivery_response: DeliveryOutcome,
}

impl From<RequestCodeResult> for RequestCodeResponse {
    fn from(result: RequestCodeResult) -> Self {
        Self {
            ok: true,
            sent: result.sent,
            expires_at: result.pending.expires_at,
            delivery_response: result.delivery,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyCodeResponse {
    pub ok: bool,
}

/// Accept strings and numbers; anything else counts as missing
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
