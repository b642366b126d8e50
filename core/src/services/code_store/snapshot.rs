//! Durable storage seam for code store snapshots

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::entities::PendingCode;
use crate::errors::PersistenceError;

/// Full code store contents keyed by recipient id
pub type Snapshot = HashMap<String, PendingCode>;

/// Durable storage for code store snapshots
///
/// Implementations must replace the stored snapshot atomically: a reader
/// sees either the previous snapshot or the new one, never a mix.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the last saved snapshot. A missing snapshot is an empty map.
    async fn load(&self) -> Result<Snapshot, PersistenceError>;

    /// Replace the stored snapshot
    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// Human-readable location used in log lines
    fn location(&self) -> String;
}

/// Snapshot store that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotStore;

#[async_trait]
impl SnapshotStore for NoopSnapshotStore {
    async fn load(&self) -> Result<Snapshot, PersistenceError> {
        Ok(HashMap::new())
    }

    async fn save(&self, _snapshot: &Snapshot) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn location(&self) -> String {
        "noop".to_string()
    }
}
