//! JSON file snapshot store
//!
//! The whole snapshot is written to `<path>.tmp` and renamed over `<path>`, so
//! a crash mid-write leaves the previous snapshot intact.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use vg_core::{PendingCode, PersistenceError, Snapshot, SnapshotStore};
use vg_shared::PersistenceConfig;

/// Snapshot store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the snapshot is staged in before the rename
    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> Result<Snapshot, PersistenceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file yet");
                return Ok(Snapshot::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Stable key order keeps the file diffable
        let ordered: BTreeMap<&String, &PendingCode> = snapshot.iter().collect();
        let bytes = serde_json::to_vec_pretty(&ordered)?;

        let staging = self.staging_path();
        fs::write(&staging, &bytes).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
