//! Per-recipient sliding-window rate limiting for code requests
//!
//! State is in memory only; a restart resets every window.

mod limiter;

#[cfg(test)]
mod tests;

pub use limiter::{RateDecision, SlidingWindowRateLimiter};
