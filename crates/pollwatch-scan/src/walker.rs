//! JWalk-based lazy tree walker.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jwalk::{DirEntryIter, Parallelism, WalkDir};
use pollwatch_core::{FileRecord, WatchError, WatchResult};
use tracing::debug;

use crate::metadata::extract;

/// One walked entry.
pub type WalkEntry = (PathBuf, FileRecord);

/// Options controlling a walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend through symbolic links to directories.
    pub follow_symlinks: bool,
}

/// Walk `root` with default options.
pub fn walk(root: &Path) -> WatchResult<Walk> {
    walk_with(root, WalkOptions::default())
}

/// Start a fresh traversal of `root`.
///
/// The root itself is stat'ed and opened eagerly, so an unreadable or
/// missing root fails here instead of mid-iteration. Everything below the
/// root is produced lazily.
pub fn walk_with(root: &Path, options: WalkOptions) -> WatchResult<Walk> {
    let root_record = extract(root)?;
    if !root_record.is_dir {
        return Err(WatchError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    std::fs::read_dir(root).map_err(|e| WatchError::io(root, e))?;

    let parallel = Parallelism::RayonDefaultPool {
        busy_timeout: Duration::from_millis(100),
    };
    // A busy global pool would otherwise truncate the whole walk to its root
    let inner = match walk_dir(root, options, parallel).try_into_iter() {
        Ok(inner) => inner,
        Err(err) if err.is_busy() => {
            debug!(root = %root.display(), "rayon pool busy, walking serially");
            walk_dir(root, options, Parallelism::Serial).into_iter()
        }
        Err(err) => {
            return Err(WatchError::Walk {
                path: root.to_path_buf(),
                message: err.to_string(),
            });
        }
    };

    Ok(Walk {
        root: root.to_path_buf(),
        root_entry: Some((root.to_path_buf(), root_record)),
        pending: None,
        inner,
    })
}

fn walk_dir(root: &Path, options: WalkOptions, parallelism: Parallelism) -> WalkDir {
    WalkDir::new(root)
        .parallelism(parallelism)
        .skip_hidden(false)
        .follow_links(options.follow_symlinks)
        .sort(false)
        .min_depth(1)
}

/// Lazy sequence of `(path, record)` pairs under one root, root first.
///
/// Iterating directly yields every failure; use [`Walk::tolerant`] to drop
/// entries that could not be listed or stat'ed.
pub struct Walk {
    root: PathBuf,
    root_entry: Option<WalkEntry>,
    /// Listing failure of the directory yielded last.
    pending: Option<WatchError>,
    inner: DirEntryIter<((), ())>,
}

impl Walk {
    /// Root this walk started from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Skip failed entries instead of yielding them.
    pub fn tolerant(self) -> Tolerant<Self> {
        Tolerant::new(self)
    }

    fn walk_error(&self, err: &jwalk::Error) -> WatchError {
        WatchError::Walk {
            path: err
                .path()
                .map_or_else(|| self.root.clone(), Path::to_path_buf),
            message: err.to_string(),
        }
    }
}

impl Iterator for Walk {
    type Item = WatchResult<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.root_entry.take() {
            return Some(Ok(entry));
        }
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }

        let mut entry = match self.inner.next()? {
            Ok(e) => e,
            Err(err) => return Some(Err(self.walk_error(&err))),
        };

        let path = entry.path();
        // jwalk yields an unlistable directory as Ok and parks the error on it
        if let Some(err) = entry.read_children_error.take() {
            self.pending = Some(WatchError::Walk {
                path: err.path().map_or_else(|| path.clone(), Path::to_path_buf),
                message: err.to_string(),
            });
        }
        Some(extract(&path).map(|record| (path, record)))
    }
}

/// Iterator adaptor that omits failed entries and counts them.
pub struct Tolerant<I> {
    inner: I,
    skipped: usize,
}

impl<I> Tolerant<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, skipped: 0 }
    }

    /// Number of entries dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<I> Iterator for Tolerant<I>
where
    I: Iterator<Item = WatchResult<WalkEntry>>,
{
    type Item = WalkEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => return Some(entry),
                Err(err) => {
                    // Vanished or unlistable; the deletion sweep handles what it hid
                    debug!(error = %err, "skipping entry");
                    self.skipped += 1;
                }
            }
        }
    }
}
