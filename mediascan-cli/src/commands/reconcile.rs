// mediascan-cli/src/commands/reconcile.rs
//
// --reconcile mode.

use mediascan_core::external::{MatroskaProbe, StreamProbe};
use mediascan_core::{ReconcileSummary, Scanner};

use crate::output::print_reconcile_summary;

/// Runs the batch pass. Per-record failures are logged by the core and
/// only show up in the counters.
pub fn run_reconcile<M, S>(scanner: &Scanner<M, S>) -> ReconcileSummary
where
    M: MatroskaProbe,
    S: StreamProbe,
{
    let summary = scanner.reconcile();
    print_reconcile_summary(&summary);
    summary
}
