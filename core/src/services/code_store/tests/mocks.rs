//! In-memory snapshot store for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::PersistenceError;
use crate::services::code_store::{Snapshot, SnapshotStore};

pub struct MemorySnapshotStore {
    pub stored: Mutex<Snapshot>,
    pub saves: AtomicUsize,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::new())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            stored: Mutex::new(snapshot),
            saves: AtomicUsize::new(0),
            fail_load: false,
            fail_save: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_load: true,
            fail_save: true,
            ..Self::new()
        }
    }

    pub fn stored(&self) -> Snapshot {
        self.stored.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Snapshot, PersistenceError> {
        if self.fail_load {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "corrupt snapshot",
            )));
        }
        Ok(self.stored())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if self.fail_save {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        *self.stored.lock().unwrap() = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
