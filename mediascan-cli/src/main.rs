// ============================================================================
// mediascan-cli/src/main.rs
// ============================================================================
//
// MEDIASCAN CLI: Entry point for the `mediascan` binary
//
// Responsibilities:
// - Parse arguments and build the core configuration
// - Install logging before anything else runs
// - Open the media store (a failure here is fatal)
// - Dispatch to the selected mode and map the outcome to an exit status
//
// EXIT STATUS:
// - 0: success
// - 1: the check failed, or the store could not be opened
// - 2: no usable media path was given

use clap::Parser;
use log::{error, info};
use mediascan_cli::output::print_error;
use mediascan_cli::{Cli, Mode, logging, run_check, run_reconcile, run_search};
use mediascan_core::Scanner;
use std::process;

const EXIT_FAILURE: i32 = 1;
const EXIT_MISSING_PATH: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let config = cli.core_config();

    if let Err(e) = logging::setup_logging(&config.log_dir, config.force_debug) {
        print_error(&format!("Error: {e}"));
        process::exit(EXIT_FAILURE);
    }
    info!("mediascan {} starting", env!("CARGO_PKG_VERSION"));

    let mode = cli.mode();
    match &mode {
        Mode::MissingPath => {
            error!("CRITICAL: No media path given; pass a file, --search or --reconcile");
            process::exit(EXIT_MISSING_PATH);
        }
        Mode::Check(path) if !path.exists() => {
            error!("CRITICAL: Path does not exist: {}", path.display());
            process::exit(EXIT_MISSING_PATH);
        }
        _ => {}
    }

    let scanner = match Scanner::open(config) {
        Ok(scanner) => scanner,
        Err(e) => {
            error!("Failed to open the media store: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    let outcome = match mode {
        Mode::Check(path) => run_check(&scanner, &path).map(|_| ()),
        Mode::Search { dir, deep } => run_search(&scanner, &dir, deep).map(|_| ()),
        Mode::Reconcile => {
            run_reconcile(&scanner);
            Ok(())
        }
        Mode::MissingPath => Ok(()),
    };

    if let Err(e) = outcome {
        error!("{e}");
        process::exit(EXIT_FAILURE);
    }
}
