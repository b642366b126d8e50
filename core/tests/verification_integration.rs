//! Integration tests for the verification lifecycle wired from public parts

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use vg_core::{
    Clock, CodeStore, DeliveryDispatcher, DeliveryMode, DomainError, ManualClock,
    PersistenceError, RequestCodeCommand, SecureCodeGenerator, SharedSecretGate,
    SlidingWindowRateLimiter, Snapshot, SnapshotStore, VerificationService,
    VerificationServiceConfig, VerifyCodeCommand,
};

/// Snapshot store shared between "process restarts"
#[derive(Default)]
struct SharedMemoryStore {
    snapshot: Mutex<Snapshot>,
}

#[async_trait]
impl SnapshotStore for SharedMemoryStore {
    async fn load(&self) -> Result<Snapshot, PersistenceError> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        *self.snapshot.lock().unwrap() = snapshot.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "shared-memory".to_string()
    }
}

struct App {
    service: VerificationService,
    store: Arc<CodeStore>,
    clock: Arc<ManualClock>,
}

fn app(snapshots: Arc<SharedMemoryStore>, clock: Arc<ManualClock>, ttl_seconds: i64) -> App {
    let store = Arc::new(CodeStore::new(snapshots, clock.clone()));
    let limiter = Arc::new(SlidingWindowRateLimiter::new(
        3,
        Duration::seconds(900),
        clock.clone(),
    ));
    let dispatcher = DeliveryDispatcher::select(None, true, None, std::time::Duration::from_secs(10));
    assert_eq!(dispatcher.mode(), DeliveryMode::DryRun);

    let service = VerificationService::new(
        store.clone(),
        limiter,
        Arc::new(SecureCodeGenerator),
        Arc::new(dispatcher),
        SharedSecretGate::new(Some("secret".to_string())),
        clock.clone(),
        VerificationServiceConfig {
            code_ttl: Duration::seconds(ttl_seconds),
        },
    );

    App {
        service,
        store,
        clock,
    }
}

fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    ))
}

fn request(recipient: &str) -> RequestCodeCommand {
    RequestCodeCommand {
        recipient_id: Some(recipient.to_string()),
        credential: Some("+15550001111".to_string()),
        auth_token: Some("secret".to_string()),
    }
}

fn verify(recipient: &str, code: &str) -> VerifyCodeCommand {
    VerifyCodeCommand {
        recipient_id: Some(recipient.to_string()),
        code: Some(code.to_string()),
        auth_token: Some("secret".to_string()),
    }
}

#[tokio::test]
async fn test_full_lifecycle_with_dry_run_delivery() {
    let app = app(Arc::new(SharedMemoryStore::default()), start_clock(), 300);

    let result = app.service.request_code(request("@alice")).await.unwrap();
    assert!(result.sent);
    assert_eq!(result.delivery.body["dry_run"], true);
    assert_eq!(
        result.delivery.body["text"],
        format!("Your verification code is: {}", result.pending.code)
    );
    assert_eq!(result.pending.code.len(), 5);
    assert!(result.pending.code.chars().all(|c| c.is_ascii_digit()));

    let wrong = if result.pending.code == "00000" { "00001" } else { "00000" };
    assert_eq!(
        app.service.verify_code(verify("@alice", wrong)).await,
        Err(DomainError::Mismatch)
    );
    assert!(app
        .service
        .verify_code(verify("@alice", &result.pending.code))
        .await
        .is_ok());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_sequential_requests_keep_only_last_code() {
    let app = app(Arc::new(SharedMemoryStore::default()), start_clock(), 300);

    let mut last = None;
    for _ in 0..3 {
        last = Some(app.service.request_code(request("@alice")).await.unwrap());
    }

    let last = last.unwrap();
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.store.get("@alice").unwrap().code, last.pending.code);
}

#[tokio::test]
async fn test_expiry_after_ttl() {
    let app = app(Arc::new(SharedMemoryStore::default()), start_clock(), 1);

    let result = app.service.request_code(request("@alice")).await.unwrap();
    app.clock.advance(Duration::seconds(2));

    assert_eq!(
        app.service
            .verify_code(verify("@alice", &result.pending.code))
            .await,
        Err(DomainError::Expired)
    );
    assert!(app.store.get("@alice").is_none());
}

#[tokio::test]
async fn test_rate_limit_window() {
    let app = app(Arc::new(SharedMemoryStore::default()), start_clock(), 300);

    for _ in 0..3 {
        app.service.request_code(request("@alice")).await.unwrap();
    }
    let err = app.service.request_code(request("@alice")).await.unwrap_err();
    assert!(matches!(err, DomainError::RateLimited { count: 3, limit: 3, .. }));

    app.clock.advance(Duration::seconds(901));
    assert!(app.service.request_code(request("@alice")).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fifty_concurrent_recipients() {
    let app = Arc::new(app(Arc::new(SharedMemoryStore::default()), start_clock(), 300));

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let recipient = format!("{}", 1_000 + i);
                let result = app.service.request_code(request(&recipient)).await.unwrap();
                (recipient, result.pending.code)
            })
        })
        .collect();

    let mut issued = Vec::new();
    for handle in handles {
        issued.push(handle.await.unwrap());
    }

    assert_eq!(app.store.len(), 50);
    for (recipient, code) in issued {
        let stored = app.store.get(&recipient).unwrap();
        assert_eq!(stored.recipient_id, recipient);
        assert_eq!(stored.code, code);
    }
}

#[tokio::test]
async fn test_pending_codes_survive_restart() {
    let snapshots = Arc::new(SharedMemoryStore::default());
    let clock = start_clock();

    let first = app(snapshots.clone(), clock.clone(), 300);
    let alice = first.service.request_code(request("@alice")).await.unwrap();
    first.service.request_code(request("@bob")).await.unwrap();
    first.store.flush().await.unwrap();
    drop(first);

    clock.advance(Duration::seconds(120));
    let second = app(snapshots, clock.clone(), 300);
    assert_eq!(second.store.load().await, 2);

    assert!(second
        .service
        .verify_code(verify("@alice", &alice.pending.code))
        .await
        .is_ok());
    assert_eq!(clock.now(), alice.pending.issued_at + Duration::seconds(120));
}

#[tokio::test]
async fn test_restart_after_ttl_drops_codes() {
    let snapshots = Arc::new(SharedMemoryStore::default());
    let clock = start_clock();

    let first = app(snapshots.clone(), clock.clone(), 300);
    let alice = first.service.request_code(request("@alice")).await.unwrap();
    first.store.flush().await.unwrap();

    clock.advance(Duration::seconds(300));
    let second = app(snapshots, clock, 300);
    assert_eq!(second.store.load().await, 0);
    assert_eq!(
        second
            .service
            .verify_code(verify("@alice", &alice.pending.code))
            .await,
        Err(DomainError::NotFound)
    );
}
