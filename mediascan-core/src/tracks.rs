//! Track extraction over the supported container formats.
//!
//! A file's extension selects a [`ContainerKind`]; the matching probe lists
//! the raw tracks, which are then split into audio and subtitle language
//! lists. An empty list is a valid result. Any probe failure becomes a
//! [`CoreError::Extraction`] so callers can tell "no tracks" apart from
//! "could not read the file".

use std::fmt;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::external::mkvmerge_executor::UNDETERMINED_LANGUAGE;
use crate::external::{
    ContainerTrack, CrateFfprobeExecutor, MatroskaProbe, MkvmergeExecutor, StreamProbe,
};
use crate::record::NameSet;

/// Language recorded for a generic-container stream without a language tag.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Canonical English subtitle tag.
pub const ENGLISH: &str = "eng";

/// Tags normalized to [`ENGLISH`] in subtitle lists.
const ENGLISH_FORMS: [&str; 2] = [".en", ".eng"];

/// Extensions handled by each container family.
pub const MATROSKA_EXTENSIONS: [&str; 1] = ["mkv"];
pub const GENERIC_EXTENSIONS: [&str; 2] = ["mp4", "avi"];

/// Container family of a file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Matroska,
    GenericContainer,
    Unsupported,
}

impl ContainerKind {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|ext| ext.to_str()) else {
            return ContainerKind::Unsupported;
        };
        if MATROSKA_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)) {
            ContainerKind::Matroska
        } else if GENERIC_EXTENSIONS.iter().any(|g| ext.eq_ignore_ascii_case(g)) {
            ContainerKind::GenericContainer
        } else {
            ContainerKind::Unsupported
        }
    }

    pub fn is_video(self) -> bool {
        self != ContainerKind::Unsupported
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContainerKind::Matroska => "matroska",
            ContainerKind::GenericContainer => "generic container",
            ContainerKind::Unsupported => "unsupported",
        };
        f.write_str(label)
    }
}

/// Languages found inside a container, in track order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackListing {
    pub audio: Vec<String>,
    pub subtitles: Vec<String>,
}

impl TrackListing {
    /// Both an audio and a subtitle track were found.
    pub fn has_embedded_tracks(&self) -> bool {
        !self.audio.is_empty() && !self.subtitles.is_empty()
    }
}

/// Dispatches extraction to the probe matching the container family.
pub struct TrackExtractor<M = MkvmergeExecutor, S = CrateFfprobeExecutor> {
    matroska: M,
    streams: S,
}

impl TrackExtractor {
    /// Extractor backed by `mkvmerge` and `ffprobe`.
    pub fn with_default_tools() -> Self {
        Self::new(MkvmergeExecutor::new(), CrateFfprobeExecutor::new())
    }
}

impl<M: MatroskaProbe, S: StreamProbe> TrackExtractor<M, S> {
    pub fn new(matroska: M, streams: S) -> Self {
        Self { matroska, streams }
    }

    /// Lists the audio and subtitle languages of `path`.
    pub fn extract(&self, path: &Path) -> CoreResult<TrackListing> {
        match ContainerKind::from_path(path) {
            ContainerKind::Matroska => {
                let tracks = self
                    .matroska
                    .list_tracks(path)
                    .map_err(|e| as_extraction_error(path, e))?;
                Ok(classify(&tracks, "audio", "subtitles", UNDETERMINED_LANGUAGE))
            }
            ContainerKind::GenericContainer => {
                let streams = self
                    .streams
                    .probe_streams(path)
                    .map_err(|e| as_extraction_error(path, e))?;
                Ok(classify(&streams, "audio", "subtitle", UNKNOWN_LANGUAGE))
            }
            ContainerKind::Unsupported => {
                Err(CoreError::UnsupportedFileType(path.display().to_string()))
            }
        }
    }
}

fn classify(
    tracks: &[ContainerTrack],
    audio_type: &str,
    subtitle_type: &str,
    missing_language: &str,
) -> TrackListing {
    let language = |track: &ContainerTrack| {
        track
            .language
            .clone()
            .unwrap_or_else(|| missing_language.to_string())
    };
    TrackListing {
        audio: tracks
            .iter()
            .filter(|t| t.track_type == audio_type)
            .map(language)
            .collect(),
        subtitles: tracks
            .iter()
            .filter(|t| t.track_type == subtitle_type)
            .map(language)
            .collect(),
    }
}

fn as_extraction_error(path: &Path, err: CoreError) -> CoreError {
    match err {
        CoreError::Extraction { .. } => err,
        other => CoreError::extraction(path.display(), other),
    }
}

/// Normalizes subtitle tags before they are stored.
///
/// `.en` and `.eng` become `eng`; `unknown` and empty tags are dropped.
/// Audio tags get no such treatment: an `unknown` audio track is kept.
pub fn clean_subtitles<I, T>(tags: I) -> NameSet
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            if ENGLISH_FORMS.contains(&tag) {
                Some(ENGLISH.to_string())
            } else if tag == UNKNOWN_LANGUAGE || tag.is_empty() {
                None
            } else {
                Some(tag.to_string())
            }
        })
        .collect()
}
