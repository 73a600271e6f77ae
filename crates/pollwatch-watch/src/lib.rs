//! Snapshot-and-diff polling watcher for pollwatch.
//!
//! # Overview
//!
//! `pollwatch-watch` keeps an in-memory snapshot of every path under a set
//! of roots and re-walks them on a fixed interval. Each pass:
//!
//! - emits `Created` for paths missing from the snapshot,
//! - emits `SizeChanged`, `TimeChanged` and `AttributesChanged`
//!   independently for paths whose metadata differs,
//! - emits `Deleted` for snapshot paths the pass did not observe.
//!
//! Detection is metadata-only: a rewrite that keeps both the size and the
//! modification time of a file goes unnoticed.
//!
//! # Example
//!
//! ```rust,no_run
//! use pollwatch_watch::{PollWatcher, WatchConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), pollwatch_watch::WatchError> {
//! let (watcher, mut events) = PollWatcher::new(WatchConfig::new(["/path/to/watch"]))?;
//! watcher.initialize().await?;
//!
//! let cancel = CancellationToken::new();
//! tokio::spawn(async move {
//!     while let Some(event) = events.recv().await {
//!         println!("{event}");
//!     }
//! });
//!
//! watcher.run(cancel).await?;
//! # Ok(())
//! # }
//! ```

mod diff;
mod store;
mod watcher;

pub use diff::{DiffEngine, EventSink, PassSummary};
pub use store::SnapshotStore;
pub use watcher::{PollWatcher, WatcherState};

// Re-export core types for convenience
pub use pollwatch_core::{
    ChangeEvent, ChangeKind, FileRecord, WatchConfig, WatchError, WatchResult,
};
