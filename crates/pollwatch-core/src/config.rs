//! Watcher configuration types.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::WatchError;

/// Interval between two passes unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a polling watcher.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WatchConfig {
    /// Directories to watch, in the order given.
    pub roots: Vec<PathBuf>,

    /// Time between the start of two passes.
    #[builder(default = "DEFAULT_INTERVAL")]
    #[serde(default = "default_interval")]
    pub interval: Duration,

    /// Descend through symbolic links to directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

impl WatchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.roots {
            Some(ref roots) if roots.is_empty() => {
                return Err("At least one directory is required".to_string());
            }
            Some(ref roots) if roots.iter().any(|r| r.as_os_str().is_empty()) => {
                return Err("Root path cannot be empty".to_string());
            }
            Some(_) => {}
            None => return Err("Roots are required".to_string()),
        }
        if self.interval.is_some_and(|i| i.is_zero()) {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl WatchConfig {
    /// Create a new watch config builder.
    pub fn builder() -> WatchConfigBuilder {
        WatchConfigBuilder::default()
    }

    /// Create a config watching `roots` with default settings.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            interval: DEFAULT_INTERVAL,
            follow_symlinks: false,
        }
    }

    /// Check the config the same way the builder does.
    ///
    /// Configs built through [`WatchConfig::new`] or deserialized skip the
    /// builder, so the watcher calls this before it starts.
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.roots.is_empty() {
            return Err(WatchError::NoDirectories);
        }
        if self.roots.iter().any(|r| r.as_os_str().is_empty()) {
            return Err(WatchError::InvalidConfig {
                message: "Root path cannot be empty".to_string(),
            });
        }
        if self.interval.is_zero() {
            return Err(WatchError::InvalidConfig {
                message: "Interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
