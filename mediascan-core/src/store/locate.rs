//! Store file discovery inside the asset directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::MediaStore;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::system_info::SystemIdentity;

/// Newest regular file in `dir` (not recursive) with the given extension,
/// by modification time.
pub fn find_newest_file(dir: &Path, extension: &str) -> CoreResult<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == extension);
        if !matches {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

/// Resolves the store file for `config`.
///
/// The newest store file in the asset directory wins and must open cleanly.
/// When there is none, a new store named after the machine identity is
/// created. Any failure here aborts startup.
pub fn locate_store(config: &CoreConfig) -> CoreResult<PathBuf> {
    if config.store_extension.is_empty() {
        return Err(CoreError::Config("store extension must not be empty".to_string()));
    }
    let asset_dir = &config.asset_dir;
    fs::create_dir_all(asset_dir).map_err(|e| {
        CoreError::StoreConnection(format!(
            "Failed to create asset directory {}: {}",
            asset_dir.display(),
            e
        ))
    })?;

    match find_newest_file(asset_dir, &config.store_extension)? {
        Some(existing) => {
            MediaStore::open(&existing)?;
            log::debug!("Using existing store {}", existing.display());
            Ok(existing)
        }
        None => {
            let system_id = SystemIdentity::collect().system_id();
            let fresh = asset_dir.join(format!("{system_id}.{}", config.store_extension));
            MediaStore::create(&fresh)?;
            log::info!("Created new store {}", fresh.display());
            Ok(fresh)
        }
    }
}
