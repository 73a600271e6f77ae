//! Error types for watching operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the pollwatch crates.
pub type WatchResult<T> = Result<T, WatchError>;

/// Errors that can occur while extracting, walking or watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// No directories were supplied to watch.
    #[error("At least one directory to watch is required")]
    NoDirectories,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Directory traversal failed below a root.
    #[error("Walk error at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// The seeding walk of a root failed.
    #[error("Initial walk of {root} failed: {source}")]
    InitialWalk {
        root: PathBuf,
        #[source]
        source: Box<WatchError>,
    },

    /// Operation not valid in the watcher's current state.
    #[error("Invalid watcher state: {message}")]
    InvalidState { message: String },

    /// A background task panicked or was cancelled.
    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}

impl WatchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Wrap a failure encountered while seeding `root`.
    pub fn initial_walk(root: impl Into<PathBuf>, source: WatchError) -> Self {
        Self::InitialWalk {
            root: root.into(),
            source: Box::new(source),
        }
    }
}
