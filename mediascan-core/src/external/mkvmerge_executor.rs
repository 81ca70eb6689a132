//! mkvmerge integration for matroska track listing
//!
//! Runs `mkvmerge -J <file>` and reads the track list from its JSON
//! identification output.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use super::{ContainerTrack, MatroskaProbe};
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

/// Language mkvmerge reports for tracks without one.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Root of the `mkvmerge -J` output
#[derive(Debug, Clone, Deserialize)]
pub struct MkvmergeIdentification {
    #[serde(default)]
    pub container: Option<MkvmergeContainer>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub tracks: Vec<MkvmergeTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MkvmergeContainer {
    #[serde(default)]
    pub recognized: bool,
    #[serde(default)]
    pub supported: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MkvmergeTrack {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type")]
    pub track_type: String,
    #[serde(default)]
    pub properties: MkvmergeTrackProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MkvmergeTrackProperties {
    pub language: Option<String>,
}

/// Runs the `mkvmerge` binary found on `PATH` (or the given one).
#[derive(Debug, Clone)]
pub struct MkvmergeExecutor {
    program: String,
}

impl MkvmergeExecutor {
    pub fn new() -> Self {
        Self {
            program: "mkvmerge".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MkvmergeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MatroskaProbe for MkvmergeExecutor {
    fn list_tracks(&self, path: &Path) -> CoreResult<Vec<ContainerTrack>> {
        log::debug!("Running {} -J on: {}", self.program, path.display());

        let output = Command::new(&self.program)
            .arg("-J")
            .arg(path)
            .output()
            .map_err(|e| command_start_error(self.program.clone(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        // mkvmerge exits 1 for warnings and still prints a usable identification
        if !output.status.success() && output.status.code() != Some(1) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() { stdout.to_string() } else { stderr.to_string() };
            return Err(command_failed_error(self.program.clone(), output.status, detail));
        }

        let identification = parse_identification(&stdout, path)?;
        tracks_from_identification(identification, path)
    }
}

/// Deserializes `mkvmerge -J` output.
pub fn parse_identification(json: &str, path: &Path) -> CoreResult<MkvmergeIdentification> {
    serde_json::from_str(json).map_err(|e| {
        CoreError::JsonParse(format!(
            "Failed to parse mkvmerge JSON output for {}: {}",
            path.display(),
            e
        ))
    })
}

/// Turns an identification into raw tracks; unrecognized containers and
/// reported errors are extraction failures.
pub fn tracks_from_identification(
    identification: MkvmergeIdentification,
    path: &Path,
) -> CoreResult<Vec<ContainerTrack>> {
    if !identification.errors.is_empty() {
        return Err(CoreError::extraction(path.display(), identification.errors.join("; ")));
    }
    if let Some(container) = &identification.container {
        if !container.recognized || !container.supported {
            return Err(CoreError::extraction(
                path.display(),
                "container not recognized by mkvmerge",
            ));
        }
    }

    Ok(identification
        .tracks
        .into_iter()
        .map(|track| ContainerTrack {
            track_type: track.track_type,
            language: Some(
                track
                    .properties
                    .language
                    .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string()),
            ),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "container": {"recognized": true, "supported": true, "type": "Matroska"},
        "errors": [],
        "file_name": "movie.mkv",
        "tracks": [
            {"codec": "AVC/H.264", "id": 0, "type": "video", "properties": {"language": "und"}},
            {"codec": "AC-3", "id": 1, "type": "audio", "properties": {"language": "eng"}},
            {"codec": "AAC", "id": 2, "type": "audio", "properties": {}},
            {"codec": "SubRip/SRT", "id": 3, "type": "subtitles", "properties": {"language": "fre"}}
        ],
        "warnings": []
    }"#;

    #[test]
    fn test_parse_identification_tracks() {
        let path = Path::new("/m/movie.mkv");
        let identification = parse_identification(SAMPLE, path).unwrap();
        let tracks = tracks_from_identification(identification, path).unwrap();

        assert_eq!(
            tracks,
            vec![
                ContainerTrack::new("video", Some("und")),
                ContainerTrack::new("audio", Some("eng")),
                ContainerTrack::new("audio", Some("und")),
                ContainerTrack::new("subtitles", Some("fre")),
            ]
        );
    }

    #[test]
    fn test_unrecognized_container_is_extraction_error() {
        let json = r#"{"container": {"recognized": false, "supported": false}, "errors": [], "tracks": []}"#;
        let path = Path::new("/m/broken.mkv");
        let identification = parse_identification(json, path).unwrap();
        let result = tracks_from_identification(identification, path);
        assert!(matches!(result, Err(CoreError::Extraction { .. })));
    }

    #[test]
    fn test_reported_errors_are_extraction_errors() {
        let json = r#"{"errors": ["The file could not be opened"], "tracks": []}"#;
        let path = Path::new("/m/missing.mkv");
        let identification = parse_identification(json, path).unwrap();
        match tracks_from_identification(identification, path) {
            Err(CoreError::Extraction { reason, .. }) => {
                assert!(reason.contains("could not be opened"))
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_output_is_json_error() {
        let result = parse_identification("not json", Path::new("/m/movie.mkv"));
        assert!(matches!(result, Err(CoreError::JsonParse(_))));
    }
}
