//! Core types for pollwatch.
//!
//! This crate provides the data structures shared by the scanning and
//! watching crates: per-path file records, change events, watcher
//! configuration and the error taxonomy.

mod config;
mod error;
mod event;
mod record;

pub use config::{DEFAULT_INTERVAL, WatchConfig, WatchConfigBuilder};
pub use error::{WatchError, WatchResult};
pub use event::{ChangeEvent, ChangeKind};
pub use record::{ChangeSet, FileRecord};
