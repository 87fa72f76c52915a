//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: a plain-text session log under the configured log
//! directory (recreated on every start) and a console layer on stdout.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const SESSION_LOG: &str = "session.log";

const DEFAULT_FILTER: &str =
    "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn";

/// Filter from `RUST_LOG`, falling back to the quiet SDK defaults.
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
}

/// Clears the previous session log, creating `log_dir` if needed.
fn prepare_log_dir(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    }
    let log_path = log_dir.join(SESSION_LOG);
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }
    Ok(())
}

/// Initializes logging. The returned guard must be held for the life of the process so
/// buffered file output is flushed.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    prepare_log_dir(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, SESSION_LOG);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_creates_dir_and_clears_log() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        prepare_log_dir(&dir).unwrap();
        assert!(dir.is_dir());

        fs::write(dir.join(SESSION_LOG), "old session").unwrap();
        prepare_log_dir(&dir).unwrap();
        assert!(!dir.join(SESSION_LOG).exists());
    }
}
