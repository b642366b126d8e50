//! # Verigram API
//!
//! actix-web surface over the verification service, process bootstrap and
//! logging initialization.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
