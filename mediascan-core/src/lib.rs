//! Core library for cataloguing video files and their audio/subtitle tracks.
//!
//! This crate normalizes file identities, lists container tracks through
//! `mkvmerge` and `ffprobe`, links sidecar subtitles, detects duplicates by
//! filename, and keeps the findings in a SQLite store that converges over
//! repeated passes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mediascan_core::{CoreConfig, Scanner, SearchOptions};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/assets"),
//!     PathBuf::from("/path/to/logs"),
//! );
//! let scanner = Scanner::open(config).unwrap();
//!
//! let summary = scanner.search("/path/to/media", SearchOptions { deep: true }).unwrap();
//! println!("{} new video(s)", summary.catalogued);
//!
//! let report = scanner.check("/path/to/media/movie.mkv").unwrap();
//! scanner.confirm_complete(report.id).unwrap();
//! ```

pub mod config;
pub mod duplicates;
pub mod error;
pub mod external;
pub mod path;
pub mod record;
pub mod scanner;
pub mod sidecar;
pub mod store;
pub mod system_info;
pub mod tracks;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use duplicates::find_duplicates;
pub use error::{CoreError, CoreResult, describe_failure, report_failure};
pub use external::{ContainerTrack, CrateFfprobeExecutor, MatroskaProbe, MkvmergeExecutor, StreamProbe};
pub use record::{MediaRecord, NameSet, ScanState};
pub use scanner::{ReconcileSummary, ScanReport, Scanner, SearchOptions, SearchSummary};
pub use sidecar::{Sidecar, link_sidecars, match_sidecar};
pub use store::{MediaStore, locate_store};
pub use system_info::SystemIdentity;
pub use tracks::{ContainerKind, TrackExtractor, TrackListing, clean_subtitles};
