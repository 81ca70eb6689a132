//! Command implementations for the CLI.
//!
//! Each submodule runs one mode of the `mediascan` binary against an open
//! [`Scanner`](mediascan_core::Scanner).

/// Single-file check followed by the completion signal.
pub mod scan;

/// Directory walk, optionally checking every video found.
pub mod search;

/// Batch pass over every incomplete record.
pub mod reconcile;

pub use reconcile::run_reconcile;
pub use scan::run_check;
pub use search::run_search;
