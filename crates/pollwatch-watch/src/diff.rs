//! Snapshot diffing: classify one pass's observations into change events.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pollwatch_core::{ChangeEvent, ChangeKind, FileRecord, WatchError, WatchResult};
use pollwatch_scan::{WalkOptions, walk_with};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::store::SnapshotStore;

/// Consumer of change events.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: ChangeEvent);
}

impl EventSink for Vec<ChangeEvent> {
    fn emit(&mut self, event: ChangeEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<ChangeEvent> {
    fn emit(&mut self, event: ChangeEvent) {
        // A dropped receiver only means nobody is listening anymore
        let _ = self.send(event);
    }
}

/// Counters describing one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Distinct paths observed across all roots.
    pub observed: usize,
    /// Entries dropped because they could not be listed or stat'ed.
    pub skipped: usize,
    /// Roots that could not be walked at all.
    pub unreadable_roots: usize,
    /// `Created` events emitted.
    pub created: usize,
    /// Size, time and attribute events emitted.
    pub modified: usize,
    /// `Deleted` events emitted.
    pub deleted: usize,
    /// Wall time spent on the pass.
    pub elapsed: Duration,
}

impl PassSummary {
    /// Total number of events emitted by the pass.
    pub fn events(&self) -> usize {
        self.created + self.modified + self.deleted
    }
}

/// Walks every root and reconciles the results against a [`SnapshotStore`].
#[derive(Debug)]
pub struct DiffEngine {
    roots: Vec<PathBuf>,
    options: WalkOptions,
    store: Arc<SnapshotStore>,
}

impl DiffEngine {
    /// Create an engine over `roots` that keeps its state in `store`.
    pub fn new(roots: Vec<PathBuf>, options: WalkOptions, store: Arc<SnapshotStore>) -> Self {
        Self {
            roots,
            options,
            store,
        }
    }

    /// Roots walked on every pass, in order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Store holding the snapshot.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Populate the snapshot from a full walk without emitting events.
    ///
    /// Any failure, at a root or below it, aborts seeding. Returns the number
    /// of paths in the snapshot afterwards.
    pub fn seed(&self) -> WatchResult<usize> {
        for root in &self.roots {
            let walk =
                walk_with(root, self.options).map_err(|e| WatchError::initial_walk(root, e))?;
            for entry in walk {
                let (path, record) = entry.map_err(|e| WatchError::initial_walk(root, e))?;
                self.store.set(path, record);
            }
        }

        let entries = self.store.len();
        info!(roots = self.roots.len(), entries, "snapshot seeded");
        Ok(entries)
    }

    /// Run one pass: walk every root, emit events, update the snapshot, then
    /// sweep paths that were not observed.
    ///
    /// Failures never abort a pass. An unreadable root contributes no entries
    /// and an entry that vanishes mid-walk is omitted; either way the sweep
    /// reports what disappeared.
    pub fn run_pass<S>(&self, sink: &mut S) -> PassSummary
    where
        S: EventSink + ?Sized,
    {
        let start = Instant::now();
        let mut summary = PassSummary::default();
        let mut observed: HashSet<PathBuf> = HashSet::with_capacity(self.store.len());

        for root in &self.roots {
            let walk = match walk_with(root, self.options) {
                Ok(walk) => walk,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "root unreadable, skipping for this pass");
                    summary.unreadable_roots += 1;
                    continue;
                }
            };

            let mut entries = walk.tolerant();
            for (path, record) in entries.by_ref() {
                self.observe(path, record, &mut observed, sink, &mut summary);
            }
            summary.skipped += entries.skipped();
        }

        // Deletion sweep runs only after every root has been walked
        for path in self.store.paths() {
            if observed.contains(&path) {
                continue;
            }
            if self.store.remove(&path).is_some() {
                sink.emit(ChangeEvent::deleted(path));
                summary.deleted += 1;
            }
        }

        summary.observed = observed.len();
        summary.elapsed = start.elapsed();
        debug!(
            observed = summary.observed,
            skipped = summary.skipped,
            created = summary.created,
            modified = summary.modified,
            deleted = summary.deleted,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "pass complete"
        );
        summary
    }

    /// Classify one observation and record it.
    fn observe<S>(
        &self,
        path: PathBuf,
        record: FileRecord,
        observed: &mut HashSet<PathBuf>,
        sink: &mut S,
        summary: &mut PassSummary,
    ) where
        S: EventSink + ?Sized,
    {
        match self.store.get(&path) {
            None => {
                sink.emit(ChangeEvent::created(path.clone()));
                summary.created += 1;
            }
            Some(old) => {
                let changes = old.diff(&record);
                let flagged = [
                    (changes.size, ChangeKind::SizeChanged),
                    (changes.modified, ChangeKind::TimeChanged),
                    (changes.mode, ChangeKind::AttributesChanged),
                ];
                for (changed, kind) in flagged {
                    if changed {
                        sink.emit(ChangeEvent::new(kind, path.clone()));
                        summary.modified += 1;
                    }
                }
            }
        }

        self.store.set(path.clone(), record);
        observed.insert(path);
    }
}
