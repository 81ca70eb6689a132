// ============================================================================
// mediascan-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the mediascan core library
//
// KEY COMPONENTS:
// - CoreError: every failure the scan engine can surface
// - CoreResult: result alias used across the crate
// - report_failure: logs a failure together with the enclosing operation,
//   the call site and the arguments that were in play
//
// Failures are caught at the nearest operation boundary (one file, one query)
// and logged; only store initialization at startup is fatal.

use std::fmt;
use std::io;
use std::panic::Location;
use std::process::ExitStatus;

use thiserror::Error;

/// Custom error types for mediascan-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store connection failed: {0}")]
    StoreConnection(String),

    #[error("Store query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Track extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for mediascan-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Builds an extraction error for `path`.
    pub fn extraction(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        CoreError::Extraction {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

/// Formats a failure as `[operation]:[file:line]|[args]|[error:...]`.
///
/// The location is the caller's, so the line points at the operation that
/// gave up rather than at this helper.
#[track_caller]
pub fn describe_failure(operation: &str, args: &[(&str, &dyn fmt::Display)], err: &CoreError) -> String {
    let location = Location::caller();
    let args = args
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[{operation}]:[{}:{}]|[{args}]|[error:{err}]",
        location.file(),
        location.line()
    )
}

/// Logs a failure at error level with its operation context and returns the
/// formatted message.
#[track_caller]
pub fn report_failure(operation: &str, args: &[(&str, &dyn fmt::Display)], err: &CoreError) -> String {
    let message = describe_failure(operation, args, err);
    log::error!("{message}");
    message
}
