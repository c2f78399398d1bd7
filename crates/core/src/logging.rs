//! Structured JSON logging.
//!
//! Logs are written as JSON lines to `pagestack-<run_id>.json` inside the
//! configured directory, through a non-blocking `tracing_appender` writer.
//! Every process gets a UUID v7 run ID, so sorting the file names sorts the
//! runs chronologically. At startup the oldest runs are deleted so that,
//! including the new one, at most `max-files` logs remain.
//!
//! `RUST_LOG` takes precedence over the configured level:
//!
//! ```bash
//! RUST_LOG=pagestack_core::navigation=trace,info pagestack script.txt
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use pagestack_core::settings::LoggingSettings;
//! use pagestack_core::logging::{init_logging, shutdown_logging};
//!
//! init_logging(&LoggingSettings::default())?;
//! tracing::info!("Application started");
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_PREFIX: &str = "pagestack-";
const LOG_FILE_SUFFIX: &str = "json";
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Returns the run ID of this process.
///
/// Generated on first access and constant afterwards.
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

/// Deletes the oldest run logs so that at most `keep` remain.
///
/// Relies on run IDs being UUID v7: lexicographic file name order is
/// chronological order.
fn prune_run_logs(log_dir: &Path, keep: usize) -> Result<(), Error> {
    let mut logs = collect_run_logs(log_dir)?;
    if logs.len() <= keep {
        return Ok(());
    }

    logs.sort();
    let remove_count = logs.len() - keep;
    for path in logs.into_iter().take(remove_count) {
        fs::remove_file(&path)
            .with_context(|| format!("can't remove old log file {}", path.display()))?;
    }

    Ok(())
}

/// Creates this run's log file in `log_dir`.
///
/// Older runs are pruned first so that, counting the new file, at most
/// `max_files` logs remain. `max_files == 0` keeps every run.
///
/// # Errors
///
/// Returns an error if old logs can't be listed or removed, or if the new
/// file can't be created.
fn open_run_log(log_dir: &Path, max_files: usize) -> Result<RollingFileAppender, Error> {
    if max_files > 0 {
        prune_run_logs(log_dir, max_files - 1)?;
    }

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .context("can't initialize log file appender")
}

fn collect_run_logs(log_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log(&entry.file_name().to_string_lossy()) {
            logs.push(entry.path());
        }
    }

    Ok(logs)
}

fn is_run_log(file_name: &str) -> bool {
    file_name.starts_with(LOG_FILE_PREFIX) && file_name.ends_with(LOG_FILE_SUFFIX)
}

/// Installs the global JSON subscriber.
///
/// Does nothing when logging is disabled. Must be called at most once per
/// process; a second call fails because a global subscriber is already set.
///
/// # Errors
///
/// Fails if the log directory can't be prepared, the appender can't be built,
/// the level filter doesn't parse or a subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let log_dir = std::env::current_dir()
        .context("can't get current working directory")?
        .join(&settings.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    let appender = open_run_log(&log_dir, settings.max_files)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(build_filter(settings)?)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    tracing::info!(run_id = get_run_id(), version = VERSION, "logging started");

    Ok(())
}

/// Flushes buffered log lines.
///
/// Waits at most five seconds for the writer thread to drain.
pub fn shutdown_logging() {
    let Some(mutex) = LOG_GUARD.get() else {
        return;
    };

    let Ok(mut slot) = mutex.lock() else {
        return;
    };

    if let Some(guard) = slot.take() {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            drop(guard);
            let _ = tx.send(());
        });

        let _ = rx.recv_timeout(SHUTDOWN_TIMEOUT);
    }
}

/// `RUST_LOG` wins; otherwise the configured level, `info` when blank.
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    filter_from_level(&settings.level)
}

fn filter_from_level(level: &str) -> Result<EnvFilter, Error> {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .with_context(|| format!("invalid logging level {:?}", level))
}
