use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Binary under test with its store and logs kept inside `root`
fn mediascan_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mediascan").expect("Failed to find mediascan binary");
    cmd.env_remove("MEDIASCAN_FORCE_DEBUG")
        .arg("--asset-dir")
        .arg(root.join("assets"))
        .arg("--log-dir")
        .arg(root.join("logs"));
    cmd
}

fn files_with_extension(dir: &Path, extension: &str) -> usize {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
                .count()
        })
        .unwrap_or(0)
}

#[test]
fn test_no_path_exits_with_status_2() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediascan_cmd(root.path())
        .assert()
        .code(2)
        .stderr(contains("No media path given"));

    // nothing was scanned, so no store was created
    assert_eq!(files_with_extension(&root.path().join("assets"), "db"), 0);
    Ok(())
}

#[test]
fn test_nonexistent_path_exits_with_status_2() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediascan_cmd(root.path())
        .arg(root.path().join("surely/this/does/not/exist.mkv"))
        .assert()
        .code(2)
        .stderr(contains("Path does not exist"));
    Ok(())
}

#[test]
fn test_unsupported_file_fails_the_check() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let notes = root.path().join("notes.txt");
    fs::write(&notes, "not a video")?;

    mediascan_cmd(root.path())
        .arg(&notes)
        .assert()
        .code(1)
        .stderr(contains("Unsupported file type"));
    Ok(())
}

#[test]
fn test_search_creates_store_and_daily_log() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let media = root.path().join("media");
    fs::create_dir_all(media.join("season1"))?;
    fs::write(media.join("movie.mkv"), "")?;
    fs::write(media.join("movie.eng.srt"), "")?;
    fs::write(media.join("season1").join("episode.mp4"), "")?;

    mediascan_cmd(root.path())
        .arg("--search")
        .arg(&media)
        .assert()
        .success()
        .stdout(contains("Search Summary"));

    assert_eq!(files_with_extension(&root.path().join("assets"), "db"), 1);
    assert_eq!(files_with_extension(&root.path().join("logs"), "log"), 1);

    let log_file = fs::read_dir(root.path().join("logs"))?
        .filter_map(Result::ok)
        .next()
        .expect("daily log file");
    let content = fs::read_to_string(log_file.path())?;
    assert!(content.starts_with("***START_OF_LOG for "));
    assert!(content.contains("[INFO]"));
    Ok(())
}

#[test]
fn test_second_run_reuses_the_store() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let media = root.path().join("media");
    fs::create_dir_all(&media)?;

    mediascan_cmd(root.path()).arg("--search").arg(&media).assert().success();
    mediascan_cmd(root.path()).arg("--search").arg(&media).assert().success();

    assert_eq!(files_with_extension(&root.path().join("assets"), "db"), 1);
    Ok(())
}

#[test]
fn test_reconcile_on_empty_store() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediascan_cmd(root.path())
        .arg("--reconcile")
        .assert()
        .success()
        .stdout(contains("Reconcile Summary"));
    Ok(())
}

#[test]
fn test_deep_requires_search() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediascan_cmd(root.path()).arg("--deep").assert().failure();
    Ok(())
}
