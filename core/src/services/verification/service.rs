//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tracing::{info, warn};

use vg_shared::mask_recipient;

use super::config::VerificationServiceConfig;
use super::gate::SharedSecretGate;
use super::types::{RequestCodeCommand, RequestCodeResult, VerifyCodeCommand};
use crate::domain::entities::PendingCode;
use crate::errors::{DomainError, DomainResult};
use crate::services::clock::Clock;
use crate::services::code_generator::CodeGenerator;
use crate::services::code_store::CodeStore;
use crate::services::delivery::{verification_message, DeliveryDispatcher};
use crate::services::rate_limit::SlidingWindowRateLimiter;

/// Orchestrates code requests and verification
///
/// Per recipient the lifecycle is `NoCode -> Pending -> {Verified | Expired |
/// Replaced}`; the terminal states are represented by deletion or overwrite
/// in the code store.
pub struct VerificationService {
    store: Arc<CodeStore>,
    limiter: Arc<SlidingWindowRateLimiter>,
    generator: Arc<dyn CodeGenerator>,
    dispatcher: Arc<DeliveryDispatcher>,
    gate: SharedSecretGate,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service
    pub fn new(
        store: Arc<CodeStore>,
        limiter: Arc<SlidingWindowRateLimiter>,
        generator: Arc<dyn CodeGenerator>,
        dispatcher: Arc<DeliveryDispatcher>,
        gate: SharedSecretGate,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            store,
            limiter,
            generator,
            dispatcher,
            gate,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &Arc<CodeStore> {
        &self.store
    }

    pub fn dispatcher(&self) -> &Arc<DeliveryDispatcher> {
        &self.dispatcher
    }

    /// Issue a code for a recipient and deliver it
    ///
    /// Checks run in order: auth, delivery configuration, input, rate limit.
    /// The code is stored before dispatch, so a failed delivery still leaves
    /// a verifiable code behind.
    pub async fn request_code(&self, command: RequestCodeCommand) -> DomainResult<RequestCodeResult> {
        self.gate.check(command.auth_token.as_deref())?;

        if !self.dispatcher.is_usable() {
            warn!(event = "request_misconfigured", "Code requested with no delivery backend");
            return Err(DomainError::Config {
                message: "no delivery backend configured; set TELEGRAM_BOT_TOKEN, SESSION_GATEWAY_URL or DRY_RUN".to_string(),
            });
        }

        let recipient_id = required(command.recipient_id, "recipientId")?;
        let credential = required(command.credential, "credential")?;

        let decision = self.limiter.check_and_record(&recipient_id);
        if !decision.admitted {
            let retry_after_seconds = self.limiter.retry_after(&recipient_id);
            warn!(
                recipient = %mask_recipient(&recipient_id),
                count = decision.count,
                retry_after_seconds,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(DomainError::RateLimited {
                count: decision.count,
                limit: self.limiter.limit(),
                window_seconds: self.limiter.window().num_seconds().max(0) as u64,
                retry_after_seconds,
            });
        }

        let code = self.generator.generate();
        let pending = self.store.put(&recipient_id, &code, self.config.code_ttl);

        info!(
            recipient = %mask_recipient(&recipient_id),
            credential = %mask_recipient(&credential),
            expires_at = %pending.expires_at,
            ttl_seconds = pending.ttl().num_seconds(),
            event = "otp_generated",
            "Generated new verification code"
        );

        let delivery = self
            .dispatcher
            .send(&recipient_id, &verification_message(&code))
            .await;
        let sent = delivery.is_success();

        if !sent {
            warn!(
                recipient = %mask_recipient(&recipient_id),
                status = delivery.status_code,
                event = "otp_delivery_failed",
                "Verification code stored but not delivered"
            );
        }

        Ok(RequestCodeResult {
            pending,
            sent,
            delivery,
        })
    }

    /// Check a submitted code and consume it on success
    ///
    /// An expired code is removed when found. A wrong code leaves the pending
    /// entry in place.
    pub async fn verify_code(&self, command: VerifyCodeCommand) -> DomainResult<PendingCode> {
        self.gate.check(command.auth_token.as_deref())?;

        let recipient_id = required(command.recipient_id, "recipientId")?;
        // Blank check only; the code itself is compared exactly as submitted
        let submitted = command.code.unwrap_or_default();
        if submitted.trim().is_empty() {
            return Err(DomainError::missing("code"));
        }
        let recipient = mask_recipient(&recipient_id);

        let Some(pending) = self.store.get(&recipient_id) else {
            info!(recipient = %recipient, event = "otp_not_found", "No pending code");
            return Err(DomainError::NotFound);
        };

        if pending.is_expired_at(self.clock.now()) {
            // A code issued since the read is left alone
            self.store.consume_if(&recipient_id, |current| current == &pending);
            info!(recipient = %recipient, event = "otp_expired", "Verification code expired");
            return Err(DomainError::Expired);
        }

        if !constant_time_eq(submitted.as_bytes(), pending.code.as_bytes()) {
            warn!(recipient = %recipient, event = "otp_mismatch", "Verification code mismatch");
            return Err(DomainError::Mismatch);
        }

        match self.store.consume_if(&recipient_id, |current| current == &pending) {
            Some(consumed) => {
                info!(recipient = %recipient, event = "otp_verified", "Verification code accepted");
                Ok(consumed)
            }
            // Replaced by a newer request: the submitted code is stale
            None if self.store.get(&recipient_id).is_some() => {
                warn!(recipient = %recipient, event = "otp_superseded", "Verification code was replaced");
                Err(DomainError::Mismatch)
            }
            // Consumed by a concurrent verify
            None => Err(DomainError::NotFound),
        }
    }
}

/// Trimmed value of a required field
fn required(value: Option<String>, field: &str) -> DomainResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::missing(field)),
    }
}
