//! Tests for the delivery transports

mod session_gateway_tests;
mod stub;
mod telegram_bot_tests;
