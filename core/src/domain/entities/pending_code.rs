//! Pending verification code entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of a verification code
pub const CODE_LENGTH: usize = 5;

/// A code that has been issued to a recipient and not yet consumed
///
/// The code store keeps at most one of these per recipient; issuing a new
/// code replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCode {
    /// Recipient identifier (chat id, phone number or @username)
    pub recipient_id: String,

    /// The zero-padded numeric code
    pub code: String,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,

    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,
}

impl PendingCode {
    /// Creates a pending code issued at `issued_at` and valid for `ttl`
    ///
    /// An expiry past the representable range saturates.
    pub fn issue(
        recipient_id: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Lifetime the code was issued with
    pub fn ttl(&self) -> Duration {
        self.expires_at - self.issued_at
    }

    /// Whether the code can no longer be verified at `now`
    ///
    /// The expiry instant itself is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether a snapshot entry should be restored at `now`
    ///
    /// Entries whose expiry instant has been reached are dropped on reload.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
