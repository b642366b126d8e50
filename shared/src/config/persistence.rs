//! Snapshot persistence configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{read_var, Lookup};

/// Default snapshot location, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "data/codes.json";

/// Where the pending-code snapshot lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersistenceConfig {
    /// Snapshot file path
    pub path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl PersistenceConfig {
    /// Load from `STORE_PATH`
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            path: read_var(lookup, "STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
        }
    }
}
