//! Logging setup for the command line tool.
//!
//! Log entries go to the console and to two files in the log directory:
//!
//! - `program_logging.log`: every entry at or above the active level
//! - `warnings.log`: warnings and errors only (file-not-found, unparseable
//!   dates, emptied values)
//!
//! Both files are appended to across runs. The level defaults to `info` and
//! can be overridden with `RUST_LOG`.
//!
//! ```no_run
//! student_cleaner::logging::init(None).expect("Failed to initialize logging");
//! tracing::info!("Pipeline started");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

pub const LOG_FILE_PREFIX: &str = "program_logging";
pub const WARNING_FILE_PREFIX: &str = "warnings";

/// Default log directory, under the platform data directory:
///
/// - Windows: `%APPDATA%/student_cleaner/logs`
/// - macOS: `~/Library/Application Support/student_cleaner/logs`
/// - Linux: `~/.local/share/student_cleaner/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("student_cleaner").join("logs"))
}

/// Initializes console and file logging. `log_dir` overrides [`default_log_dir`].
///
/// # Errors
///
/// Returns error if the log directory cannot be created, a file appender
/// fails, or a global subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir()?,
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let all_logs_appender = file_appender(&log_dir, LOG_FILE_PREFIX)?;
    let warning_logs_appender = file_appender(&log_dir, WARNING_FILE_PREFIX)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer().with_target(false).compact();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let warning_logs_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(warning_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(warning_logs_layer)
        .try_init()
        .context("Failed to install logging subscriber")?;

    tracing::info!("Logging initialized, log directory: {}", log_dir.display());
    Ok(log_dir)
}

fn file_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("Failed to create {prefix} file appender"))
}
