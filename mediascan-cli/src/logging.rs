// ============================================================================
// mediascan-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern dispatch to a daily log file and the console
//
// The core library only talks to the `log` facade; this module installs the
// global logger for the binary.
//
// KEY COMPONENTS:
// - setup_logging: installs the dispatcher and returns the log file path
// - Timestamp helpers for file names and log lines
//
// OUTPUT:
// - <log_dir>/<YYYYMMDD>.log, appended, one banner line per new file
// - stderr: errors always, every level with --debug

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use mediascan_core::CoreError;

use crate::error::{CliErrorContext, CliResult};

/// Returns the current UTC date formatted as "YYYYMMDD".
///
/// Used as the name of the daily log file.
pub fn get_log_date() -> String {
    chrono::Utc::now().format("%Y%m%d").to_string()
}

/// Returns the current UTC timestamp formatted for log lines.
pub fn get_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// First line written to a new daily log file.
pub fn start_banner(date: &str) -> String {
    format!("***START_OF_LOG for {date}***")
}

/// Path of the log file for `date` inside `log_dir`.
pub fn log_file_path(log_dir: &Path, date: &str) -> PathBuf {
    log_dir.join(format!("{date}.log"))
}

/// Opens today's log file for appending, writing the banner when the file
/// is new.
pub fn open_daily_log(log_dir: &Path) -> CliResult<(fs::File, PathBuf)> {
    fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let date = get_log_date();
    let path = log_file_path(log_dir, &date);
    let is_new = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;
    if is_new {
        writeln!(file, "{}", start_banner(&date))
            .cli_with_context(|| format!("Failed to write log file {}", path.display()))?;
    }
    Ok((file, path))
}

/// Installs the global logger.
///
/// The file receives Info and above (Debug and above with `debug`); the
/// console gets errors only unless `debug` is set.
pub fn setup_logging(log_dir: &Path, debug: bool) -> CliResult<PathBuf> {
    let (file, path) = open_daily_log(log_dir)?;
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Info };
    let console_level = if debug { LevelFilter::Debug } else { LevelFilter::Error };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                get_timestamp(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .chain(
            fern::Dispatch::new()
                .level(console_level)
                .chain(std::io::stderr()),
        )
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to install logger: {e}")))?;

    log::debug!("Logging to {}", path.display());
    Ok(path)
}
