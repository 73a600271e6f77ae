//! Concurrent snapshot of last-known file records.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use pollwatch_core::FileRecord;

/// Mapping from absolute path to its last-observed [`FileRecord`].
///
/// Backed by a sharded reader/writer map: any number of readers may run
/// concurrently, a writer holds its shard exclusively, and every lock is held
/// for a single operation only. Records are replaced whole, so a reader sees
/// either the previous or the new record, never a mix.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    records: DashMap<PathBuf, FileRecord>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Copy of the record stored for `path`.
    pub fn get(&self, path: &Path) -> Option<FileRecord> {
        self.records.get(path).map(|r| r.value().clone())
    }

    /// Insert or replace the record for `path`, returning the previous one.
    pub fn set(&self, path: PathBuf, record: FileRecord) -> Option<FileRecord> {
        self.records.insert(path, record)
    }

    /// Remove `path`, returning its record if it was present.
    pub fn remove(&self, path: &Path) -> Option<FileRecord> {
        self.records.remove(path).map(|(_, record)| record)
    }

    /// Check if `path` is present.
    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    /// Number of stored paths.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of every stored path.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.records.iter().map(|r| r.key().clone()).collect()
    }

    /// Copy of every stored record.
    pub fn entries(&self) -> Vec<FileRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }
}
