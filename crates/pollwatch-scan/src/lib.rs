//! Metadata extraction and tree walking for pollwatch.
//!
//! This crate turns a directory root into a lazy stream of
//! `(path, FileRecord)` pairs using jwalk for traversal.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pollwatch_scan::walk;
//!
//! let walk = walk(Path::new("/path/to/watch")).unwrap();
//! for (path, record) in walk.tolerant() {
//!     println!("{} ({} bytes)", path.display(), record.size);
//! }
//! ```

mod metadata;
mod walker;

pub use metadata::{extract, record_from_metadata};
pub use walker::{Tolerant, Walk, WalkEntry, WalkOptions, walk, walk_with};

// Re-export core types for convenience
pub use pollwatch_core::{FileRecord, WatchError, WatchResult};
