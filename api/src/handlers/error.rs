//! Mapping of domain errors to HTTP responses

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, info};

use vg_core::DomainError;

use crate::dto::ErrorResponse;

/// Error returned by route handlers
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Auth => StatusCode::UNAUTHORIZED,
            DomainError::Validation { .. }
            | DomainError::NotFound
            | DomainError::Expired
            | DomainError::Mismatch => StatusCode::BAD_REQUEST,
            DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            DomainError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let domain = &self.0;

        if status.is_server_error() {
            error!(error = %domain, code = domain.code(), "Request failed");
        } else {
            info!(error = %domain, code = domain.code(), status = status.as_u16(), "Request rejected");
        }

        let mut builder = HttpResponse::build(status);
        let mut body = ErrorResponse::new(domain.code(), domain.to_string());

        if let DomainError::RateLimited {
            count,
            limit,
            window_seconds,
            retry_after_seconds,
        } = domain
        {
            builder.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
            body = body.with_rate_limit(*count, *limit, *window_seconds);
        }

        builder.json(body)
    }
}
