// mediascan-cli/src/commands/search.rs
//
// --search mode: walk a directory and catalogue what it holds.

use std::path::Path;

use mediascan_core::external::{MatroskaProbe, StreamProbe};
use mediascan_core::{Scanner, SearchOptions, SearchSummary};

use crate::error::{CliErrorContext, CliResult};
use crate::output::print_search_summary;

pub fn run_search<M, S>(scanner: &Scanner<M, S>, dir: &Path, deep: bool) -> CliResult<SearchSummary>
where
    M: MatroskaProbe,
    S: StreamProbe,
{
    let summary = scanner
        .search(dir, SearchOptions { deep })
        .cli_with_context(|| format!("Failed to search {}", dir.display()))?;
    print_search_summary(&summary, deep);
    Ok(summary)
}
