//! Service info and health endpoints

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::app::AppState;

/// `GET /`
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "service": "verigram",
        "version": env!("CARGO_PKG_VERSION"),
        "info": "POST /request_code with JSON {recipientId, credential}, then POST /verify_code with JSON {recipientId, code}",
        "deliveryMode": state.service.dispatcher().mode(),
        "endpoints": {
            "request_code": {
                "path": "/request_code",
                "method": "POST",
                "request_body": {
                    "recipientId": "string (chat id, phone or @username)",
                    "credential": "string"
                },
                "responses": {
                    "200": "Code stored; see sent/deliveryResponse for delivery result",
                    "400": "Missing recipientId or credential",
                    "401": "Invalid X-Auth-Token",
                    "429": "Too many requests for this recipient",
                    "500": "No delivery backend configured"
                }
            },
            "verify_code": {
                "path": "/verify_code",
                "method": "POST",
                "request_body": {
                    "recipientId": "string",
                    "code": "string (5 digits)"
                },
                "responses": {
                    "200": "Code accepted and consumed",
                    "400": "expired, mismatch, not_found or validation_error",
                    "401": "Invalid X-Auth-Token"
                }
            },
            "health": {
                "path": "/health",
                "method": "GET"
            }
        }
    }))
}

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "verigram",
        "version": env!("CARGO_PKG_VERSION"),
        "pending_codes": state.service.store().len(),
        "delivery_mode": state.service.dispatcher().mode(),
        "delivery_backend": state.service.dispatcher().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
