//! Filename-based duplicate detection.
//!
//! Matching is loose on purpose: any other catalogued path containing the
//! file's stem counts, so `movie.mkv` and `movie.720p.mkv` pair up. False
//! positives are acceptable.

use crate::error::report_failure;
use crate::path;
use crate::sidecar::SIDECAR_EXTENSION;
use crate::store::MediaStore;

/// Other catalogued paths sharing the stem of `identity`.
///
/// Sidecar paths never count. A failing query is logged and yields no
/// duplicates.
pub fn find_duplicates(store: &MediaStore, identity: &str) -> Vec<String> {
    let stem = path::file_stem(identity);
    if stem.is_empty() {
        return Vec::new();
    }

    match store.paths_containing(stem, identity) {
        Ok(paths) => paths
            .into_iter()
            .filter(|p| !p.to_ascii_lowercase().ends_with(SIDECAR_EXTENSION))
            .collect(),
        Err(e) => {
            report_failure("Failed to look up duplicates", &[("path", &identity), ("stem", &stem)], &e);
            Vec::new()
        }
    }
}
