//! Request and response bodies

pub mod codes;
pub mod error;

pub use codes::{RequestCodeRequest, RequestCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
pub use error::ErrorResponse;
