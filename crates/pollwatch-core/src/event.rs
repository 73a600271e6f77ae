//! Change events emitted by a pass.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Classification of an observed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Path was not in the snapshot.
    Created,
    /// Size differs from the snapshot.
    SizeChanged,
    /// Modification time differs from the snapshot.
    TimeChanged,
    /// Permission or type bits differ from the snapshot.
    AttributesChanged,
    /// Path was in the snapshot but not observed by the pass.
    Deleted,
}

impl ChangeKind {
    /// Message prefix used when rendering an event as a line.
    pub fn message(&self) -> &'static str {
        match self {
            ChangeKind::Created => "File created",
            ChangeKind::SizeChanged => "File content modified (size changed)",
            ChangeKind::TimeChanged => "File modified (time changed)",
            ChangeKind::AttributesChanged => "File attributes modified",
            ChangeKind::Deleted => "File deleted",
        }
    }
}

/// A single change notification for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Created, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Deleted, path)
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.message(), self.path.display())
    }
}
