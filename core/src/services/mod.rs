//! Business services implementing the verification-code lifecycle.

pub mod clock;
pub mod code_generator;
pub mod code_store;
pub mod delivery;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use code_generator::{CodeGenerator, SecureCodeGenerator};
pub use code_store::{CodeStore, NoopSnapshotStore, Snapshot, SnapshotStore};
pub use delivery::{
    DeliveryBackend, DeliveryDispatcher, DeliveryMode, DeliveryOutcome, DryRunBackend,
    UserSessionBackend, UserSessionClient,
};
pub use rate_limit::{RateDecision, SlidingWindowRateLimiter};
pub use verification::{
    RequestCodeCommand, RequestCodeResult, SharedSecretGate, VerificationService,
    VerificationServiceConfig, VerifyCodeCommand,
};
