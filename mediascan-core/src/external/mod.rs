// ============================================================================
// mediascan-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with container inspection tools
//
// The scan engine never parses containers itself. It asks a probe for the
// list of tracks and classifies them. Probes sit behind traits so tests (and
// callers with other tooling) can substitute their own implementations.
//
// KEY COMPONENTS:
// - ContainerTrack: one raw track/stream as reported by a tool
// - MatroskaProbe / StreamProbe: the two probe seams
// - MkvmergeExecutor: `mkvmerge -J` identification for matroska files
// - CrateFfprobeExecutor: ffprobe crate for mp4/avi and friends

use std::path::Path;

use crate::error::CoreResult;

/// Contains the mkvmerge identification executor
pub mod mkvmerge_executor;

/// Contains the ffprobe stream executor
pub mod ffprobe_executor;

pub use ffprobe_executor::CrateFfprobeExecutor;
pub use mkvmerge_executor::MkvmergeExecutor;

/// A track or stream as reported by an inspection tool, before any
/// classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTrack {
    /// Tool-specific type label (`"audio"`, `"subtitles"`, `"subtitle"`, ...)
    pub track_type: String,
    /// Language tag, when the container declares one
    pub language: Option<String>,
}

impl ContainerTrack {
    pub fn new(track_type: &str, language: Option<&str>) -> Self {
        Self {
            track_type: track_type.to_string(),
            language: language.map(str::to_string),
        }
    }
}

/// Lists the tracks of a matroska container, in track order.
pub trait MatroskaProbe {
    fn list_tracks(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>>;
}

/// Lists the streams of a generic container (mp4, avi, ...), in stream order.
pub trait StreamProbe {
    fn probe_streams(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>>;
}

impl<T: MatroskaProbe + ?Sized> MatroskaProbe for &T {
    fn list_tracks(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>> {
        (**self).list_tracks(path)
    }
}

impl<T: StreamProbe + ?Sized> StreamProbe for &T {
    fn probe_streams(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>> {
        (**self).probe_streams(path)
    }
}
