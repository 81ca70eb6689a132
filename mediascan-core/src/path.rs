//! Path identity normalization.
//!
//! Every record in the store is keyed by a single canonical string form of
//! its file path. Two spellings of the same file (relative vs. absolute, `./`
//! segments, backslash separators) must collide to the same key.
//!
//! The identity form never contains a single quote: quotes are stored as
//! backticks and mapped back by [`to_filesystem_path`] when the real file is
//! needed.

use std::path::{Component, Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Canonical directory separator of identity strings.
pub const SEPARATOR: char = '/';

/// Character stored in place of a single quote.
pub const QUOTE_SUBSTITUTE: char = '`';

/// Converts `raw_path` into its identity string.
///
/// The path is made absolute against the current directory and `.`/`..`
/// components are resolved lexically (the file does not need to exist).
/// Backslashes become `/` and single quotes become backticks.
///
/// A path that is not valid UTF-8 has no identity and is rejected with
/// [`CoreError::NonUtf8Path`].
///
/// `normalize(normalize(x)) == normalize(x)` for every accepted input.
///
/// # Examples
///
/// ```rust
/// use mediascan_core::path::normalize;
///
/// assert_eq!(normalize("/media/./films/../films/It's.mkv").unwrap(), "/media/films/It`s.mkv");
/// ```
pub fn normalize(raw_path: impl AsRef<Path>) -> CoreResult<String> {
    let absolute = absolutize(raw_path.as_ref());
    let text = absolute
        .to_str()
        .ok_or_else(|| CoreError::NonUtf8Path(absolute.to_string_lossy().into_owned()))?;
    Ok(text.replace('\\', "/").replace('\'', "`"))
}

/// Maps an identity string back to the path of the file on disk.
pub fn to_filesystem_path(identity: &str) -> PathBuf {
    PathBuf::from(identity.replace(QUOTE_SUBSTITUTE, "'"))
}

/// File name portion of an identity string.
pub fn file_name(identity: &str) -> &str {
    identity.rsplit(SEPARATOR).next().unwrap_or(identity)
}

/// File name without its final extension.
pub fn file_stem(identity: &str) -> &str {
    let name = file_name(identity);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Directory portion of an identity string, without the trailing separator.
pub fn parent_dir(identity: &str) -> &str {
    match identity.rfind(SEPARATOR) {
        Some(0) => "/",
        Some(idx) => &identity[..idx],
        None => "",
    }
}

fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                log::warn!("Could not read current directory for {}: {}", path.display(), e);
                path.to_path_buf()
            }
        }
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
