//! External subtitle (`.srt`) discovery next to a video file.

use std::fs;

use crate::error::CoreResult;
use crate::path::{self, QUOTE_SUBSTITUTE};

/// Extension of the sidecar files this crate links.
pub const SIDECAR_EXTENSION: &str = ".srt";

/// An external subtitle file matched to a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecar {
    /// Name of the file on disk, in identity form
    pub file_name: String,
    /// `<stem>.<lang>.srt`, or `<stem>.srt` without a language
    pub descriptor: String,
    pub language: Option<String>,
}

impl Sidecar {
    /// Subtitle tag contributed by this sidecar (`.<lang>`).
    pub fn subtitle_tag(&self) -> Option<String> {
        self.language.as_ref().map(|lang| format!(".{lang}"))
    }
}

/// Matches `file_name` against a video stem.
///
/// The name must start with `stem` and end with `.srt`. When the remainder
/// after the stem holds exactly two dots (`.eng.srt`) the segment between
/// them is the language; any other shape carries no language.
pub fn match_sidecar(stem: &str, file_name: &str) -> Option<Sidecar> {
    if stem.is_empty() || !file_name.starts_with(stem) || !file_name.ends_with(SIDECAR_EXTENSION) {
        return None;
    }
    let language = sidecar_language(&file_name[stem.len()..]);
    let descriptor = match &language {
        Some(lang) => format!("{stem}.{lang}{SIDECAR_EXTENSION}"),
        None => format!("{stem}{SIDECAR_EXTENSION}"),
    };
    Some(Sidecar {
        file_name: file_name.to_string(),
        descriptor,
        language,
    })
}

/// Language segment of a sidecar remainder such as `.eng.srt`.
pub fn sidecar_language(remainder: &str) -> Option<String> {
    let parts: Vec<&str> = remainder.split('.').collect();
    // two dots give exactly three parts: prefix, language, extension
    if parts.len() != 3 || parts[1].is_empty() {
        return None;
    }
    Some(parts[1].to_string())
}

/// Lists the sidecars of the video stored under `identity`.
///
/// Sibling names are compared in identity form, so a quote in the file name
/// matches the backtick in the stored stem.
pub fn link_sidecars(identity: &str) -> CoreResult<Vec<Sidecar>> {
    let stem = path::file_stem(identity);
    let dir = path::to_filesystem_path(path::parent_dir(identity));

    let mut names = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        names.push(
            entry
                .file_name()
                .to_string_lossy()
                .replace('\'', &QUOTE_SUBSTITUTE.to_string()),
        );
    }
    names.sort();

    let sidecars: Vec<Sidecar> = names
        .iter()
        .filter_map(|name| match_sidecar(stem, name))
        .collect();
    log::debug!("Found {} sidecar(s) for {}", sidecars.len(), identity);
    Ok(sidecars)
}
