// mediascan-core/tests/search_reconcile_tests.rs

mod common;

use common::{FakeProbe, generic_streams, matroska_tracks, scanner_with, touch_all};
use mediascan_core::error::CoreError;
use mediascan_core::path;
use mediascan_core::{ReconcileSummary, ScanState, SearchOptions, SearchSummary};
use tempfile::tempdir;

const TREE: [&str; 7] = [
    "films/movie.mkv",
    "films/movie.eng.srt",
    "shows/show.mp4",
    "shows/show.srt",
    "shows/notes.txt",
    "shows/extra/clip.AVI",
    "orphans/nobody.eng.srt",
];

#[test]
fn test_search_catalogues_videos_and_links_sidecars() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch_all(dir.path(), &TREE);
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);

    let summary = scanner.search(dir.path(), SearchOptions::default())?;
    assert_eq!(
        summary,
        SearchSummary {
            videos: 3,
            catalogued: 3,
            sidecars_linked: 2,
            checked: 0,
            failed: 0,
        }
    );
    assert_eq!(probe.call_count(), 0);

    let movie = path::normalize(dir.path().join("films/movie.mkv"))?;
    let record = scanner.store().find_by_path(&movie)?.expect("movie catalogued");
    assert_eq!(record.sidecars.to_stored().as_deref(), Some("movie.eng.srt"));
    assert_eq!(record.state(), ScanState::New);

    let show = path::normalize(dir.path().join("shows/show.mp4"))?;
    let record = scanner.store().find_by_path(&show)?.expect("show catalogued");
    assert_eq!(record.sidecars.to_stored().as_deref(), Some("show.srt"));
    Ok(())
}

#[test]
fn test_repeated_search_adds_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    touch_all(dir.path(), &TREE);
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);

    scanner.search(dir.path(), SearchOptions::default())?;
    let again = scanner.search(dir.path(), SearchOptions::default())?;
    assert_eq!(again.videos, 3);
    assert_eq!(again.catalogued, 0);
    assert_eq!(again.sidecars_linked, 0);
    assert_eq!(scanner.store().all()?.len(), 3);
    Ok(())
}

#[test]
fn test_deep_search_checks_every_video() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let files = touch_all(dir.path(), &TREE);
    let probe = FakeProbe::new();
    probe.set_tracks(&files[0], matroska_tracks(&["eng"], &["eng"]));
    probe.set_tracks(&files[2], generic_streams(&[Some("eng")], &[]));
    // clip.AVI has no response and fails
    let scanner = scanner_with(&probe);

    let summary = scanner.search(dir.path(), SearchOptions { deep: true })?;
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.failed, 1);

    let movie = scanner
        .store()
        .find_by_path(&path::normalize(&files[0])?)?
        .expect("movie catalogued");
    assert_eq!(movie.state(), ScanState::Complete);
    Ok(())
}

#[test]
fn test_sidecar_of_complete_record_is_not_counted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let files = touch_all(dir.path(), &["movie.mkv"]);
    let probe = FakeProbe::new();
    probe.set_tracks(&files[0], matroska_tracks(&["eng"], &["eng"]));
    let scanner = scanner_with(&probe);
    assert_eq!(scanner.check(&files[0])?.state, ScanState::Complete);

    touch_all(dir.path(), &["movie.fre.srt"]);
    let first = scanner.search(dir.path(), SearchOptions::default())?;
    let second = scanner.search(dir.path(), SearchOptions::default())?;
    assert_eq!(first.sidecars_linked, 0);
    assert_eq!(second.sidecars_linked, 0);

    let record = scanner.store().find_by_path(&path::normalize(&files[0])?)?.expect("movie");
    assert!(record.sidecars.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_search_skips_names_that_are_not_utf8() -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir()?;
    for raw in [&b"a\xff.mkv"[..], &b"a\xfe.mkv"[..]] {
        let name = OsStr::from_bytes(raw);
        if std::fs::File::create(dir.path().join(name)).is_err() {
            // filesystems that enforce UTF-8 names cannot hold these files
            return Ok(());
        }
    }
    touch_all(dir.path(), &["b.mkv"]);
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);

    let summary = scanner.search(dir.path(), SearchOptions::default())?;
    assert_eq!(summary.videos, 1);
    assert_eq!(summary.catalogued, 1);
    assert_eq!(summary.failed, 2);
    let paths: Vec<String> = scanner.store().all()?.into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec![path::normalize(dir.path().join("b.mkv"))?]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_search_follows_symlinked_videos() -> Result<(), Box<dyn std::error::Error>> {
    let library = tempdir()?;
    let storage = tempdir()?;
    let target = touch_all(storage.path(), &["movie.mkv"]);
    std::os::unix::fs::symlink(&target[0], library.path().join("linked.mkv"))?;
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);

    let summary = scanner.search(library.path(), SearchOptions::default())?;
    assert_eq!(summary.videos, 1);
    assert_eq!(summary.catalogued, 1);
    let linked = path::normalize(library.path().join("linked.mkv"))?;
    assert!(scanner.store().find_by_path(&linked)?.is_some());
    Ok(())
}

#[test]
fn test_search_missing_directory() {
    let dir = tempdir().unwrap();
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);

    let result = scanner.search(dir.path().join("nope"), SearchOptions::default());
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[test]
fn test_reconcile_completes_exactly_the_embedded_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let files = touch_all(
        dir.path(),
        &["a/english.mkv", "b/dubbed.mp4", "c/audio_only.mp4", "d/broken.mkv"],
    );
    let probe = FakeProbe::new();
    probe.set_tracks(&files[0], matroska_tracks(&["eng"], &["eng"]));
    probe.set_tracks(&files[1], generic_streams(&[Some("eng")], &[Some("spa")]));
    probe.set_tracks(&files[2], generic_streams(&[Some("eng")], &[]));
    probe.set_failure(&files[3], "truncated file");
    let scanner = scanner_with(&probe);

    scanner.search(dir.path(), SearchOptions::default())?;

    let summary = scanner.reconcile();
    assert_eq!(
        summary,
        ReconcileSummary {
            examined: 4,
            completed: 2,
            failed: 1,
        }
    );

    let states: Vec<ScanState> = files
        .iter()
        .map(|f| {
            scanner
                .store()
                .find_by_path(&path::normalize(f).unwrap())
                .unwrap()
                .unwrap()
                .state()
        })
        .collect();
    assert_eq!(
        states,
        vec![
            ScanState::Complete,
            ScanState::Complete,
            ScanState::Partial,
            ScanState::New,
        ]
    );

    // a second pass only revisits what is still incomplete
    let again = scanner.reconcile();
    assert_eq!(again.examined, 2);
    assert_eq!(again.completed, 0);
    Ok(())
}

#[test]
fn test_reconcile_on_empty_store() {
    let probe = FakeProbe::new();
    let scanner = scanner_with(&probe);
    assert_eq!(scanner.reconcile(), ReconcileSummary::default());
}
