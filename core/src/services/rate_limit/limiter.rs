//! Sliding-window rate limiter implementation

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, trace};

use vg_shared::{mask_recipient, RateLimitConfig};

use crate::services::clock::{bounded_seconds, Clock};

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Whether the request was admitted (and recorded)
    pub admitted: bool,
    /// Requests inside the window after this check
    pub count: usize,
}

/// Sliding-window request counter keyed by recipient
///
/// Each recipient keeps the timestamps of its admitted requests inside the
/// trailing window. Rejected requests are never recorded, so a client that
/// keeps retrying while limited does not extend its own lockout.
pub struct SlidingWindowRateLimiter {
    /// Admitted request times per recipient, oldest first
    windows: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
    /// Max requests admitted inside one window
    limit: usize,
    /// Window length
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowRateLimiter {
    /// Create a limiter admitting `limit` requests per `window`
    pub fn new(limit: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
            clock,
        }
    }

    /// Create a limiter from configuration, window capped at `MAX_DURATION_SECONDS`
    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.max_requests,
            bounded_seconds(config.window_seconds),
            clock,
        )
    }

    /// Max requests per window
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Prune the recipient's window and admit the request if there is room
    pub fn check_and_record(&self, recipient_id: &str) -> RateDecision {
        let now = self.clock.now();
        let cutoff = now - self.window;

        let mut windows = self.windows.lock();
        let timestamps = windows.entry(recipient_id.to_string()).or_default();
        prune(timestamps, cutoff);

        if timestamps.len() >= self.limit {
            debug!(
                recipient = %mask_recipient(recipient_id),
                count = timestamps.len(),
                limit = self.limit,
                event = "rate_limit_rejected",
                "Code request rejected by rate limiter"
            );
            return RateDecision {
                admitted: false,
                count: timestamps.len(),
            };
        }

        timestamps.push_back(now);
        trace!(
            recipient = %mask_recipient(recipient_id),
            count = timestamps.len(),
            "Code request admitted"
        );
        RateDecision {
            admitted: true,
            count: timestamps.len(),
        }
    }

    /// Seconds until the oldest retained request leaves the window
    ///
    /// Returns 0 when the recipient has room right now.
    pub fn retry_after(&self, recipient_id: &str) -> u64 {
        if self.limit == 0 {
            return self.window.num_seconds().max(1) as u64;
        }

        let now = self.clock.now();
        let windows = self.windows.lock();

        let Some(timestamps) = windows.get(recipient_id) else {
            return 0;
        };
        let live: Vec<&DateTime<Utc>> = timestamps
            .iter()
            .filter(|t| **t >= now - self.window)
            .collect();
        if live.len() < self.limit {
            return 0;
        }

        // The request that must expire is the one that brings the count back
        // below the limit.
        let blocking = live[live.len() - self.limit];
        let wait = (*blocking + self.window - now).num_seconds();
        wait.max(1) as u64
    }
}

/// Drop timestamps older than `cutoff` from the front of the window
fn prune(timestamps: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while timestamps.front().is_some_and(|t| *t < cutoff) {
        timestamps.pop_front();
    }
}
