use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::features::history::storage::app_data_dir;

const LOG_FILE_NAME: &str = "quick-translate.log";
const DEFAULT_FILTER: &str = "quick_translate=info";

/// Route `tracing` output to a log file.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = logs_dir();
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .try_init()?;

    Ok(guard)
}

/// `<data dir>/quick-translate/logs`, or the temp dir when there is no data dir
pub fn logs_dir() -> PathBuf {
    app_data_dir()
        .unwrap_or_else(|| std::env::temp_dir().join("quick-translate"))
        .join("logs")
}
