//! Shared fixtures for the HTTP tests

use actix_web::web;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use vg_api::AppState;
use vg_core::{
    CodeGenerator, CodeStore, DeliveryDispatcher, ManualClock, NoopSnapshotStore, SharedSecretGate,
    SlidingWindowRateLimiter, VerificationService, VerificationServiceConfig,
};

/// Generator that always hands out the same code
pub struct FixedGenerator(pub &'static str);

impl CodeGenerator for FixedGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub store: Arc<CodeStore>,
    pub clock: Arc<ManualClock>,
}

pub struct Options {
    pub secret: Option<&'static str>,
    pub dry_run: bool,
    pub ttl_seconds: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            secret: None,
            dry_run: true,
            ttl_seconds: 300,
        }
    }
}

pub fn test_app(options: Options) -> TestApp {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 15, 10, 0, 0).unwrap(),
    ));
    let store = Arc::new(CodeStore::new(Arc::new(NoopSnapshotStore), clock.clone()));
    let limiter = Arc::new(SlidingWindowRateLimiter::new(
        3,
        Duration::seconds(900),
        clock.clone(),
    ));
    let dispatcher = DeliveryDispatcher::select(
        None,
        options.dry_run,
        None,
        std::time::Duration::from_secs(10),
    );

    let service = VerificationService::new(
        store.clone(),
        limiter,
        Arc::new(FixedGenerator("04217")),
        Arc::new(dispatcher),
        SharedSecretGate::new(options.secret.map(str::to_string)),
        clock.clone(),
        VerificationServiceConfig {
            code_ttl: Duration::seconds(options.ttl_seconds),
        },
    );

    TestApp {
        state: web::Data::new(AppState::new(Arc::new(service))),
        store,
        clock,
    }
}
