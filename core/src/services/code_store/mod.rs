//! Authoritative recipient → pending code mapping with snapshot persistence
//!
//! The in-memory map is the source of truth. Every mutation schedules a
//! background write of the full map through a [`SnapshotStore`]; failures are
//! logged and never surface to callers.

mod snapshot;
mod store;

#[cfg(test)]
mod tests;

pub use snapshot::{NoopSnapshotStore, Snapshot, SnapshotStore};
pub use store::CodeStore;
