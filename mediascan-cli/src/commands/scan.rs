// mediascan-cli/src/commands/scan.rs
//
// Default mode: check one file, then confirm it complete.

use std::path::Path;

use log::info;
use mediascan_core::external::{MatroskaProbe, StreamProbe};
use mediascan_core::{ScanReport, ScanState, Scanner};

use crate::error::{CliErrorContext, CliResult};
use crate::output::print_scan_report;

/// Checks `path` and, when the check succeeds, marks the record complete.
///
/// Running this on the command line is how a user accepts a file's findings,
/// so generic containers that only reach the embedded state are completed
/// here.
pub fn run_check<M, S>(scanner: &Scanner<M, S>, path: &Path) -> CliResult<ScanReport>
where
    M: MatroskaProbe,
    S: StreamProbe,
{
    let mut report = scanner
        .check(path)
        .cli_with_context(|| format!("Failed to check {}", path.display()))?;

    if report.state != ScanState::Complete {
        scanner.confirm_complete(report.id)?;
        report.state = ScanState::Complete;
        info!("Confirmed {} complete", report.path);
    }
    print_scan_report(&report);
    Ok(report)
}
