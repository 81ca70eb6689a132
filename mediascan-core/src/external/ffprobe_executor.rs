//! FFprobe integration for generic container stream listing
//!
//! This module lists the streams of mp4/avi style containers through the
//! ffprobe crate.

use std::path::Path;

use ffprobe::{FfProbeError, ffprobe};

use super::{ContainerTrack, StreamProbe};
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

/// Stream probe backed by the ffprobe crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl StreamProbe for CrateFfprobeExecutor {
    fn probe_streams(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>> {
        log::debug!("Running ffprobe (via crate) for streams on: {}", path.display());
        match ffprobe(path) {
            Ok(metadata) => {
                let streams: Vec<ContainerTrack> = metadata
                    .streams
                    .iter()
                    .map(|stream| ContainerTrack {
                        track_type: stream.codec_type.clone().unwrap_or_default(),
                        language: stream.tags.as_ref().and_then(|tags| tags.language.clone()),
                    })
                    .collect();
                if streams.is_empty() {
                    log::warn!("No streams found by ffprobe for {}", path.display());
                }
                Ok(streams)
            }
            Err(err) => {
                log::error!("ffprobe failed for streams on {}: {:?}", path.display(), err);
                Err(map_ffprobe_error(err, "streams"))
            }
        }
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::JsonParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::JsonParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
