//! Per-path metadata records.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Last-observed state of one filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Size in bytes as reported by the platform (not meaningful for directories).
    pub size: u64,

    /// Last modification time.
    pub modified: SystemTime,

    /// Permission and file type bits.
    pub mode: u32,

    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        modified: SystemTime,
        mode: u32,
        is_dir: bool,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
            mode,
            is_dir,
        }
    }

    /// Path this record describes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compare against a newer observation of the same path.
    pub fn diff(&self, newer: &FileRecord) -> ChangeSet {
        ChangeSet {
            size: self.size != newer.size,
            modified: self.modified != newer.modified,
            mode: self.mode != newer.mode,
        }
    }
}

/// Independent change flags between two records of one path.
///
/// Any combination may be set; a content change that keeps both size and
/// modification time leaves every flag clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub size: bool,
    pub modified: bool,
    pub mode: bool,
}

impl ChangeSet {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        !(self.size || self.modified || self.mode)
    }
}
