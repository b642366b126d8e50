//! Route handlers
//!
//! - `POST /request_code` issue and deliver a code
//! - `POST /verify_code` check a submitted code
//! - `GET /` service info, `GET /health` liveness and store size

pub mod info;
pub mod request_code;
pub mod verify_code;

use actix_web::{web, HttpRequest};
use serde::de::DeserializeOwned;
use tracing::debug;

use vg_shared::config::auth::AUTH_HEADER;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(info::index))
        .route("/health", web::get().to(info::health))
        .route("/request_code", web::post().to(request_code::request_code))
        .route("/verify_code", web::post().to(verify_code::verify_code));
}

/// Value of the shared-secret header, if present
pub(crate) fn auth_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Parse a JSON body, treating anything unparseable as an empty object
pub(crate) fn lenient_json<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "Request body is not usable JSON, treating as empty");
        T::default()
    })
}
