//! Durable storage for code store snapshots

mod json_file;

#[cfg(test)]
mod tests;

pub use json_file::JsonFileSnapshotStore;
