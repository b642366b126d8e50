//! Inputs and outputs of the verification service

use crate::domain::entities::PendingCode;
use crate::services::delivery::DeliveryOutcome;

/// Request to issue and deliver a new code
///
/// Fields are optional so that missing input is reported by the service
/// itself, after the auth check.
#[derive(Debug, Clone, Default)]
pub struct RequestCodeCommand {
    pub recipient_id: Option<String>,
    pub credential: Option<String>,
    /// Value of the `X-Auth-Token` header
    pub auth_token: Option<String>,
}

/// Request to check a submitted code
#[derive(Debug, Clone, Default)]
pub struct VerifyCodeCommand {
    pub recipient_id: Option<String>,
    pub code: Option<String>,
    /// Value of the `X-Auth-Token` header
    pub auth_token: Option<String>,
}

/// Result of a successful code request
///
/// The code is stored even when delivery failed; `sent` tells the caller
/// whether the backend accepted the message.
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    pub pending: PendingCode,
    pub sent: bool,
    pub delivery: DeliveryOutcome,
}
