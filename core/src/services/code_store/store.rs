//! In-memory code store with versioned background flushes

use chrono::Duration;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};

use vg_shared::mask_recipient;

use super::snapshot::{Snapshot, SnapshotStore};
use crate::domain::entities::PendingCode;
use crate::errors::PersistenceError;
use crate::services::clock::Clock;

/// Map state plus the version of the mutation that produced it
struct State {
    codes: Snapshot,
    version: u64,
}

/// Write-side bookkeeping shared with spawned flush tasks
struct Writer {
    backend: Arc<dyn SnapshotStore>,
    /// Serializes snapshot writes and loads
    io_lock: AsyncMutex<()>,
    /// Version of the last snapshot successfully written
    written: AtomicU64,
}

impl Writer {
    async fn write(&self, version: u64, codes: Snapshot) -> Result<(), PersistenceError> {
        let _io = self.io_lock.lock().await;

        if self.written.load(Ordering::Acquire) >= version {
            debug!(version, "Skipping stale snapshot flush");
            return Ok(());
        }

        self.backend.save(&codes).await?;
        self.written.store(version, Ordering::Release);
        debug!(
            version,
            entries = codes.len(),
            location = %self.backend.location(),
            "Snapshot written"
        );
        Ok(())
    }
}

/// Authoritative store of pending codes, at most one per recipient
pub struct CodeStore {
    state: RwLock<State>,
    writer: Arc<Writer>,
    clock: Arc<dyn Clock>,
}

impl CodeStore {
    /// Create an empty store persisting through `backend`
    pub fn new(backend: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State {
                codes: Snapshot::new(),
                version: 0,
            }),
            writer: Arc::new(Writer {
                backend,
                io_lock: AsyncMutex::new(()),
                written: AtomicU64::new(0),
            }),
            clock,
        }
    }

    /// Store a code for `recipient_id`, replacing any pending one
    pub fn put(&self, recipient_id: &str, code: &str, ttl: Duration) -> PendingCode {
        let pending = PendingCode::issue(recipient_id, code, self.clock.now(), ttl);

        let (version, codes) = {
            let mut state = self.state.write();
            let replaced = state
                .codes
                .insert(recipient_id.to_string(), pending.clone())
                .is_some();
            state.version += 1;
            debug!(
                recipient = %mask_recipient(recipient_id),
                replaced,
                expires_at = %pending.expires_at,
                event = "code_stored",
                "Pending code stored"
            );
            (state.version, state.codes.clone())
        };

        self.schedule_flush(version, codes);
        pending
    }

    /// Pending code for `recipient_id`, if any
    pub fn get(&self, recipient_id: &str) -> Option<PendingCode> {
        self.state.read().codes.get(recipient_id).cloned()
    }

    /// Remove and return the pending code for `recipient_id`
    pub fn consume(&self, recipient_id: &str) -> Option<PendingCode> {
        let (removed, flush) = {
            let mut state = self.state.write();
            match state.codes.remove(recipient_id) {
                Some(removed) => {
                    state.version += 1;
                    (Some(removed), Some((state.version, state.codes.clone())))
                }
                None => (None, None),
            }
        };

        if let Some((version, codes)) = flush {
            debug!(
                recipient = %mask_recipient(recipient_id),
                event = "code_consumed",
                "Pending code removed"
            );
            self.schedule_flush(version, codes);
        }
        removed
    }

    /// Remove and return the pending code only if `predicate` accepts it
    ///
    /// The check and the removal happen under one write lock, so an entry
    /// replaced after the caller read it is never removed by mistake.
    pub fn consume_if<F>(&self, recipient_id: &str, predicate: F) -> Option<PendingCode>
    where
        F: FnOnce(&PendingCode) -> bool,
    {
        let (removed, version, codes) = {
            let mut state = self.state.write();
            if !state.codes.get(recipient_id).is_some_and(predicate) {
                return None;
            }
            let removed = state.codes.remove(recipient_id);
            state.version += 1;
            (removed, state.version, state.codes.clone())
        };

        debug!(
            recipient = %mask_recipient(recipient_id),
            event = "code_consumed",
            "Pending code removed"
        );
        self.schedule_flush(version, codes);
        removed
    }

    /// Replace the in-memory map with the stored snapshot
    ///
    /// Entries already expired are dropped. An unreadable snapshot is logged
    /// and treated as empty. Returns the number of entries restored.
    pub async fn load(&self) -> usize {
        let _io = self.writer.io_lock.lock().await;
        let location = self.writer.backend.location();

        let stored = match self.writer.backend.load().await {
            Ok(stored) => stored,
            Err(e) => {
                error!(
                    error = %e,
                    location = %location,
                    event = "snapshot_load_failed",
                    "Failed to read code snapshot, starting empty"
                );
                Snapshot::new()
            }
        };

        let now = self.clock.now();
        let total = stored.len();
        let live: Snapshot = stored
            .into_iter()
            .filter(|(_, pending)| pending.is_live_at(now))
            .collect();
        let restored = live.len();

        {
            let mut state = self.state.write();
            state.codes = live;
            state.version += 1;
            // Anything queued before the load describes a state that no
            // longer exists.
            self.writer.written.store(state.version, Ordering::Release);
        }

        info!(
            restored,
            dropped = total - restored,
            location = %location,
            event = "snapshot_loaded",
            "Code store loaded"
        );
        restored
    }

    /// Clone of the current map
    pub fn snapshot(&self) -> Snapshot {
        self.state.read().codes.clone()
    }

    /// Write the current map now and wait for it
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let (version, codes) = {
            let state = self.state.read();
            (state.version, state.codes.clone())
        };
        self.writer.write(version, codes).await
    }

    /// Number of pending codes, expired ones included
    pub fn len(&self) -> usize {
        self.state.read().codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn schedule_flush(&self, version: u64, codes: Snapshot) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(version, "No async runtime, snapshot flush skipped");
            return;
        };

        let writer = Arc::clone(&self.writer);
        handle.spawn(async move {
            if let Err(e) = writer.write(version, codes).await {
                error!(
                    error = %e,
                    version,
                    event = "snapshot_write_failed",
                    "Failed to persist code snapshot"
                );
            }
        });
    }
}
