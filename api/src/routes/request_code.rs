//! `POST /request_code`

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use vg_core::RequestCodeCommand;
use vg_shared::mask_recipient;

use super::{auth_token, lenient_json};
use crate::app::AppState;
use crate::dto::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::ApiError;

/// Issue a code for a recipient and deliver it
///
/// # Request Body
///
/// ```json
/// { "recipientId": "@alice", "credential": "+15550001111" }
/// ```
///
/// # Response
///
/// ```json
/// {
///     "ok": true,
///     "sent": true,
///     "expiresAt": "2026-10-15T10:05:00Z",
///     "deliveryResponse": { "statusCode": 200, "body": { "ok": true } }
/// }
/// ```
///
/// A failed delivery still answers 200 with `sent: false`; the code stays
/// pending and can be verified.
pub async fn request_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let payload: RequestCodeRequest = lenient_json(&body);

    let result = state
        .service
        .request_code(RequestCodeCommand {
            recipient_id: payload.recipient_id,
            credential: payload.credential,
            auth_token: auth_token(&req),
        })
        .await?;

    info!(
        recipient = %mask_recipient(&result.pending.recipient_id),
        sent = result.sent,
        delivery_status = result.delivery.status_code,
        "Code request served"
    );

    Ok(HttpResponse::Ok().json(RequestCodeResponse::from(result)))
}
