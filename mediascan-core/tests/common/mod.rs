// mediascan-core/tests/common/mod.rs

// --- Fake probes shared by the integration tests ---

#![allow(dead_code)]

use mediascan_core::error::{CoreError, CoreResult};
use mediascan_core::external::{ContainerTrack, MatroskaProbe, StreamProbe};
use mediascan_core::path;
use mediascan_core::{CoreConfig, MediaStore, Scanner, TrackExtractor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Answers both probe traits from a table keyed by identity string.
///
/// Files without an entry fail the way a missing file would.
#[derive(Clone, Default)]
pub struct FakeProbe {
    responses: Rc<RefCell<HashMap<String, Result<Vec<ContainerTrack>, String>>>>,
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_tracks(&self, file: impl AsRef<Path>, tracks: Vec<ContainerTrack>) {
        self.responses
            .borrow_mut()
            .insert(path::normalize(file).expect("utf-8 path"), Ok(tracks));
    }

    pub fn set_failure(&self, file: impl AsRef<Path>, reason: &str) {
        self.responses
            .borrow_mut()
            .insert(path::normalize(file).expect("utf-8 path"), Err(reason.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn respond(&self, file: &Path) -> CoreResult<Vec<ContainerTrack>> {
        self.calls.borrow_mut().push(file.to_path_buf());
        let key = path::normalize(file)?;
        match self.responses.borrow().get(&key) {
            Some(Ok(tracks)) => Ok(tracks.clone()),
            Some(Err(reason)) => Err(CoreError::extraction(file.display(), reason)),
            None => Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", file.display()),
            ))),
        }
    }
}

impl MatroskaProbe for FakeProbe {
    fn list_tracks(&self, file: &Path) -> CoreResult<Vec<ContainerTrack>> {
        self.respond(file)
    }
}

impl StreamProbe for FakeProbe {
    fn probe_streams(&self, file: &Path) -> CoreResult<Vec<ContainerTrack>> {
        self.respond(file)
    }
}

pub fn scanner_with(probe: &FakeProbe) -> Scanner<FakeProbe, FakeProbe> {
    let store = MediaStore::open_in_memory().expect("in-memory store");
    let config = CoreConfig::new(PathBuf::from("assets"), PathBuf::from(".logs"));
    Scanner::with_extractor(store, config, TrackExtractor::new(probe.clone(), probe.clone()))
}

pub fn matroska_tracks(audio: &[&str], subtitles: &[&str]) -> Vec<ContainerTrack> {
    let mut tracks = vec![ContainerTrack::new("video", Some("und"))];
    tracks.extend(audio.iter().map(|lang| ContainerTrack::new("audio", Some(*lang))));
    tracks.extend(subtitles.iter().map(|lang| ContainerTrack::new("subtitles", Some(*lang))));
    tracks
}

/// Generic-container streams; `None` leaves the language tag off.
pub fn generic_streams(audio: &[Option<&str>], subtitles: &[Option<&str>]) -> Vec<ContainerTrack> {
    let mut tracks = vec![ContainerTrack::new("video", None)];
    tracks.extend(audio.iter().map(|lang| ContainerTrack::new("audio", *lang)));
    tracks.extend(subtitles.iter().map(|lang| ContainerTrack::new("subtitle", *lang)));
    tracks
}

/// Creates empty files under `dir`, making parent directories as needed.
pub fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let file = dir.join(name);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("create parent");
            }
            File::create(&file).expect("create file");
            file
        })
        .collect()
}
