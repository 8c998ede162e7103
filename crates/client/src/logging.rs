//! File logging for the terminal client.
//!
//! Stdout carries the game itself, so tracing output only ever goes to
//! `<log root>/<session>/client.log`.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber and returns the log file path.
pub fn setup_logging(session_id: Option<&str>, log_root: Option<&Path>) -> Result<PathBuf> {
    let session_id = session_id.map(str::to_owned).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let log_root = log_root.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    let session_dir = log_root.join(&session_id);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("Failed to create log directory: {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    // The writer must outlive every span; the process exits right after main.
    std::mem::forget(guard);

    tracing::info!(session = %session_id, "Logging initialized");
    Ok(session_dir.join("client.log"))
}

/// Platform cache directory, e.g. `~/.cache/avalon/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "avalon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("avalon"))
        .join("logs")
}
