//! Error plumbing for the binary.
//!
//! Everything the CLI does fails with a [`CoreError`]; filesystem and scan
//! failures get a short description of the step that was running prepended
//! before they reach `main`.

use mediascan_core::{CoreError, CoreResult};
use std::fmt::Display;

pub type CliResult<T> = CoreResult<T>;

/// Prefixes an error with the CLI step that produced it.
pub trait CliErrorContext<T> {
    /// The description is only built when the result is an error.
    fn cli_with_context<C: Display>(self, describe: impl FnOnce() -> C) -> CliResult<T>;
}

impl<T, E: Into<CoreError>> CliErrorContext<T> for Result<T, E> {
    fn cli_with_context<C: Display>(self, describe: impl FnOnce() -> C) -> CliResult<T> {
        self.map_err(|e| CoreError::OperationFailed(format!("{}: {}", describe(), e.into())))
    }
}
