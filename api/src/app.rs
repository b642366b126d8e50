//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{web, App, HttpMessage, HttpResponse};
use std::sync::Arc;
use tracing_actix_web::{RequestId, TracingLogger};

use vg_core::VerificationService;

use crate::routes;

/// Response header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared by all handlers
pub struct AppState {
    pub service: Arc<VerificationService>,
}

impl AppState {
    pub fn new(service: Arc<VerificationService>) -> Self {
        Self { service }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        // Registered before TracingLogger so it runs inside the request span
        // and can read the id TracingLogger assigned
        .wrap_fn(|req, srv| {
            let request_id = req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.to_string())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let response = srv.call(req);
            async move {
                let mut response = response.await?;
                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Ok(response)
            }
        })
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "ok": false,
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
