//! pollwatch - Portable polling file watcher.
//!
//! Usage:
//!   pollwatch DIR [DIR...]                 Print changes as text lines
//!   pollwatch --format json DIR [DIR...]   Print changes as JSON lines
//!   pollwatch --help                       Show help

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use itertools::Itertools;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use pollwatch_core::{ChangeEvent, WatchConfig};
use pollwatch_watch::PollWatcher;

#[derive(Parser)]
#[command(
    name = "pollwatch",
    version,
    about = "Watch directories for changes by periodic re-scanning",
    long_about = "pollwatch re-scans the given directories once per second and reports \
                  created, modified and deleted entries without relying on OS \
                  notification APIs."
)]
struct Cli {
    /// Directories to watch
    #[arg(required = true, num_args = 1..)]
    directories: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = WatchConfig::new(cli.directories);
    println!(
        "Starting file watcher for directories: [{}]",
        config.roots.iter().map(|p| p.display()).join(" ")
    );

    let (watcher, mut events) = PollWatcher::new(config).context("Invalid configuration")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping");
            ctrl_c.cancel();
        }
    });

    let format = cli.format;
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            print_event(&event, format);
        }
    });

    // Seeds the snapshot first; an unreadable tree aborts before any pass runs
    watcher.start(cancel).await.context("Watcher failed")?;

    // Dropping the watcher closes the event channel so the printer drains and exits
    drop(watcher);
    printer.await.context("Event printer failed")?;

    Ok(())
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print one event in the selected format.
fn print_event(event: &ChangeEvent, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{event}"),
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!(error = %err, "failed to encode event"),
        },
    }
}
