//! Fixed-interval scheduler driving one pass per tick.

use std::path::PathBuf;
use std::sync::Arc;

use pollwatch_core::{ChangeEvent, WatchConfig, WatchError, WatchResult};
use pollwatch_scan::WalkOptions;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::diff::{DiffEngine, PassSummary};
use crate::store::SnapshotStore;

/// Lifecycle of a [`PollWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Created, snapshot not yet seeded.
    Initializing,
    /// Seeded; passes may run.
    Running,
    /// Seeding or a background pass failed. Terminal.
    Failed,
    /// The run loop was cancelled. Terminal.
    Stopped,
}

/// Polling watcher over a set of directory roots.
///
/// Passes never overlap: every pass, including the seeding walk, holds the
/// pass lock for its whole duration, whether it was started by [`run`] or by
/// a direct call to [`poll_once`].
///
/// [`run`]: PollWatcher::run
/// [`poll_once`]: PollWatcher::poll_once
pub struct PollWatcher {
    config: WatchConfig,
    engine: Arc<DiffEngine>,
    events_tx: mpsc::UnboundedSender<ChangeEvent>,
    state: watch::Sender<WatcherState>,
    pass_lock: Mutex<()>,
}

impl PollWatcher {
    /// Create a watcher and the receiving end of its event stream.
    ///
    /// Roots are made absolute against the current directory but are not
    /// touched on disk until [`PollWatcher::initialize`].
    pub fn new(config: WatchConfig) -> WatchResult<(Self, mpsc::UnboundedReceiver<ChangeEvent>)> {
        config.validate()?;

        let roots = config
            .roots
            .iter()
            .map(|root| std::path::absolute(root).map_err(|e| WatchError::io(root, e)))
            .collect::<WatchResult<Vec<PathBuf>>>()?;

        let options = WalkOptions {
            follow_symlinks: config.follow_symlinks,
        };
        let engine = Arc::new(DiffEngine::new(
            roots,
            options,
            Arc::new(SnapshotStore::new()),
        ));

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(WatcherState::Initializing);

        let watcher = Self {
            config,
            engine,
            events_tx,
            state,
            pass_lock: Mutex::new(()),
        };
        Ok((watcher, events_rx))
    }

    /// Absolute roots walked on every pass.
    pub fn roots(&self) -> &[PathBuf] {
        self.engine.roots()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WatcherState {
        *self.state.borrow()
    }

    /// Subscribe to lifecycle state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<WatcherState> {
        self.state.subscribe()
    }

    /// Shared handle to the snapshot for concurrent readers.
    pub fn snapshot(&self) -> Arc<SnapshotStore> {
        Arc::clone(self.engine.store())
    }

    /// Seed the snapshot from a full walk of every root.
    ///
    /// No events are emitted. On failure the watcher moves to
    /// [`WatcherState::Failed`] and cannot be used further.
    pub async fn initialize(&self) -> WatchResult<usize> {
        self.ensure_initializing()?;

        let _guard = self.pass_lock.lock().await;
        // A concurrent call may have seeded or failed while we waited
        self.ensure_initializing()?;

        let engine = Arc::clone(&self.engine);
        let result = tokio::task::spawn_blocking(move || engine.seed())
            .await
            .unwrap_or_else(|e| {
                Err(WatchError::TaskFailed {
                    message: e.to_string(),
                })
            });

        match result {
            Ok(entries) => {
                self.state.send_replace(WatcherState::Running);
                Ok(entries)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Run exactly one pass, waiting for any pass already in flight.
    pub async fn poll_once(&self) -> WatchResult<PassSummary> {
        self.ensure_running()?;

        let _guard = self.pass_lock.lock().await;
        let engine = Arc::clone(&self.engine);
        let mut sink = self.events_tx.clone();
        tokio::task::spawn_blocking(move || engine.run_pass(&mut sink))
            .await
            .map_err(|e| WatchError::TaskFailed {
                message: e.to_string(),
            })
    }

    /// Run one pass per tick until `cancel` fires.
    ///
    /// The first pass happens one interval after the call. A pass that
    /// outlasts the interval delays the following tick rather than queueing
    /// extra ones. Cancellation lets an in-flight pass finish.
    pub async fn run(&self, cancel: CancellationToken) -> WatchResult<()> {
        self.ensure_running()?;

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; seeding already covered it
        ticker.tick().await;

        info!(
            roots = self.roots().len(),
            interval_ms = self.config.interval.as_millis() as u64,
            "watching"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let summary = self.poll_once().await.map_err(|e| self.fail(e))?;
                    if summary.events() > 0 {
                        debug!(events = summary.events(), "changes detected");
                    }
                }
            }
        }

        self.state.send_replace(WatcherState::Stopped);
        info!("watcher stopped");
        Ok(())
    }

    /// Seed the snapshot, then run until `cancel` fires.
    pub async fn start(&self, cancel: CancellationToken) -> WatchResult<()> {
        self.initialize().await?;
        self.run(cancel).await
    }

    /// Move to [`WatcherState::Failed`] and hand `err` back.
    fn fail(&self, err: WatchError) -> WatchError {
        error!(error = %err, "watcher failed");
        self.state.send_replace(WatcherState::Failed);
        err
    }

    fn ensure_initializing(&self) -> WatchResult<()> {
        match self.state() {
            WatcherState::Initializing => Ok(()),
            state => Err(WatchError::InvalidState {
                message: format!("cannot initialize a watcher in state {state:?}"),
            }),
        }
    }

    fn ensure_running(&self) -> WatchResult<()> {
        match self.state() {
            WatcherState::Running => Ok(()),
            state => Err(WatchError::InvalidState {
                message: format!("watcher is {state:?}, expected Running"),
            }),
        }
    }
}
