//! `POST /verify_code`

use actix_web::{web, HttpRequest, HttpResponse};

use vg_core::VerifyCodeCommand;

use super::{auth_token, lenient_json};
use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;

/// Check a submitted code; a match consumes it
pub async fn verify_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let payload: VerifyCodeRequest = lenient_json(&body);

    state
        .service
        .verify_code(VerifyCodeCommand {
            recipient_id: payload.recipient_id,
            code: payload.code,
            auth_token: auth_token(&req),
        })
        .await?;

    Ok(HttpResponse::Ok().json(VerifyCodeResponse { ok: true }))
}
