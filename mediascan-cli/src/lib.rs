// mediascan-cli/src/lib.rs
//
// Library portion of the mediascan CLI application.
// Contains argument definitions, logging setup and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Mode};
pub use commands::{run_check, run_reconcile, run_search};
pub use error::{CliErrorContext, CliResult};
