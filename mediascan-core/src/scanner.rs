// ============================================================================
// mediascan-core/src/scanner.rs
// ============================================================================
//
// SCAN ORCHESTRATION: Per-file checks, directory searches and reconciliation
//
// The scanner drives a record through its lifecycle. Every pass is
// idempotent: findings are merged into what the store already holds, and a
// completed record is never touched again.
//
// KEY COMPONENTS:
// - Scanner::check: one pass over one file
// - Scanner::confirm_complete: the external completion signal
// - Scanner::search: directory walk that catalogues videos and sidecars
// - Scanner::reconcile: batch pass over every incomplete record
//
// CHECK WORKFLOW:
// 1. Classify the container by extension (unsupported files are rejected)
// 2. Upsert the record; completed records exit here
// 3. Extract the audio and subtitle tracks
// 4. Link sidecar subtitles (generic containers only)
// 5. Look up duplicates by filename stem
// 6. Merge and persist the findings
// 7. Evaluate the embedded/complete transitions and persist the flags

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::duplicates::find_duplicates;
use crate::error::{CoreError, CoreResult, report_failure};
use crate::external::{CrateFfprobeExecutor, MatroskaProbe, MkvmergeExecutor, StreamProbe};
use crate::path;
use crate::record::{NameSet, ScanState};
use crate::sidecar::{self, Sidecar, SIDECAR_EXTENSION};
use crate::store::{self, MediaStore};
use crate::tracks::{ContainerKind, ENGLISH, TrackExtractor, clean_subtitles};

// ---- External crate imports ----
use log::{debug, info, warn};
use walkdir::WalkDir;

// ---- Standard library imports ----
use std::path::Path;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Outcome of a single [`Scanner::check`] pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub id: i64,
    /// Identity string of the file
    pub path: String,
    pub container: ContainerKind,
    /// Audio languages found by this pass
    pub audio: Vec<String>,
    /// Cleaned subtitle tags found by this pass, sidecar tags included
    pub subtitles: Vec<String>,
    pub sidecars: Vec<Sidecar>,
    pub duplicates: Vec<String>,
    /// Audio and subtitle tracks were both found inside the container
    pub embedded: bool,
    /// State of the record after the pass
    pub state: ScanState,
    /// The record was already complete and nothing was inspected
    pub fast_exit: bool,
}

/// Options for [`Scanner::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also run [`Scanner::check`] on every discovered video
    pub deep: bool,
}

/// Counters returned by [`Scanner::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub videos: usize,
    pub catalogued: usize,
    pub sidecars_linked: usize,
    pub checked: usize,
    pub failed: usize,
}

/// Counters returned by [`Scanner::reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub examined: usize,
    pub completed: usize,
    pub failed: usize,
}

// ============================================================================
// SCANNER
// ============================================================================

/// Scan engine over one media store.
///
/// # Examples
///
/// ```rust,no_run
/// use mediascan_core::{CoreConfig, Scanner};
///
/// let config = CoreConfig::from_env();
/// let scanner = Scanner::open(config).unwrap();
/// let report = scanner.check("/media/films/movie.mkv").unwrap();
/// println!("{} is {}", report.path, report.state);
/// ```
pub struct Scanner<M = MkvmergeExecutor, S = CrateFfprobeExecutor> {
    store: MediaStore,
    config: CoreConfig,
    extractor: TrackExtractor<M, S>,
}

impl Scanner {
    /// Scanner over `store` using `mkvmerge` and `ffprobe`.
    pub fn new(store: MediaStore, config: CoreConfig) -> Self {
        Self::with_extractor(store, config, TrackExtractor::with_default_tools())
    }

    /// Locates (or creates) the store in the configured asset directory and
    /// opens it.
    pub fn open(config: CoreConfig) -> CoreResult<Self> {
        let store_path = store::locate_store(&config)?;
        let store = MediaStore::open(&store_path)?;
        info!("Media store: {}", store_path.display());
        Ok(Self::new(store, config))
    }
}

impl<M: MatroskaProbe, S: StreamProbe> Scanner<M, S> {
    pub fn with_extractor(store: MediaStore, config: CoreConfig, extractor: TrackExtractor<M, S>) -> Self {
        Self {
            store,
            config,
            extractor,
        }
    }

    pub fn store(&self) -> &MediaStore {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Runs one pass over the file at `raw_path`.
    ///
    /// Unsupported files are rejected before anything is stored. An
    /// extraction failure leaves the record as it was (apart from its
    /// creation on first sight) and is returned to the caller.
    pub fn check(&self, raw_path: impl AsRef<Path>) -> CoreResult<ScanReport> {
        let raw_path = raw_path.as_ref();
        path::normalize(raw_path)
            .and_then(|identity| self.check_identity(&identity))
            .inspect_err(|e| {
                report_failure("Failed to check tracks", &[("path", &raw_path.display())], e);
            })
    }

    fn check_identity(&self, identity: &str) -> CoreResult<ScanReport> {
        let container = ContainerKind::from_path(identity);
        if !container.is_video() {
            return Err(CoreError::UnsupportedFileType(identity.to_string()));
        }

        let (mut record, inserted) = self.store.upsert_path(identity)?;
        if record.complete {
            debug!("{identity} is already complete, skipping");
            return Ok(ScanReport {
                id: record.id,
                path: record.path,
                container,
                audio: Vec::new(),
                subtitles: Vec::new(),
                sidecars: Vec::new(),
                duplicates: Vec::new(),
                embedded: record.embedded,
                state: ScanState::Complete,
                fast_exit: true,
            });
        }
        if inserted {
            info!("New media: {identity}");
        }

        let listing = self.extractor.extract(&path::to_filesystem_path(identity))?;

        let sidecars = if container == ContainerKind::GenericContainer {
            sidecar::link_sidecars(identity).unwrap_or_else(|e| {
                report_failure("Failed to list sidecars", &[("path", &identity)], &e);
                Vec::new()
            })
        } else {
            Vec::new()
        };

        let duplicates = find_duplicates(&self.store, identity);

        let container_subtitles = clean_subtitles(&listing.subtitles);
        let subtitles = clean_subtitles(
            listing
                .subtitles
                .iter()
                .cloned()
                .chain(sidecars.iter().filter_map(Sidecar::subtitle_tag)),
        );

        record.extracted = true;
        record.audio_languages.extend(listing.audio.iter().cloned());
        record.subtitle_languages.merge(&subtitles);
        record.sidecars.extend(sidecars.iter().map(|s| s.descriptor.clone()));
        record.duplicates.extend(duplicates.iter().cloned());
        self.store.save_findings(&record)?;

        let embedded = listing.has_embedded_tracks();
        let terminal = container == ContainerKind::Matroska
            && embedded
            && container_subtitles.contains(ENGLISH);
        if terminal {
            self.store.mark_complete(record.id, true)?;
            info!("{identity} has English subtitles embedded, marked complete");
        } else if embedded {
            self.store.mark_embedded(record.id)?;
            debug!("{identity} has embedded audio and subtitles");
        }

        let state = self.store.get(record.id)?.state();
        debug!(
            "Checked {identity}: audio [{}], subtitles [{}], state {state}",
            listing.audio.join(", "),
            subtitles
        );

        Ok(ScanReport {
            id: record.id,
            path: record.path,
            container,
            audio: listing.audio,
            subtitles: subtitles.iter().cloned().collect(),
            sidecars,
            duplicates,
            embedded,
            state,
            fast_exit: false,
        })
    }

    /// Marks record `id` complete once the caller accepts its findings.
    pub fn confirm_complete(&self, id: i64) -> CoreResult<bool> {
        self.store.mark_complete(id, false).inspect_err(|e| {
            report_failure("Failed to mark complete", &[("id", &id)], e);
        })
    }

    /// Catalogues every video under `dir` and links the `.srt` files found
    /// next to them.
    ///
    /// Unreadable entries and per-file failures are logged and counted;
    /// only a missing root directory is an error.
    pub fn search(&self, dir: impl AsRef<Path>, options: SearchOptions) -> CoreResult<SearchSummary> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CoreError::NotFound(format!("directory {}", dir.display())));
        }
        info!("Searching {} for media", dir.display());

        let mut videos: Vec<String> = Vec::new();
        let mut subtitle_files: Vec<String> = Vec::new();
        let mut unreadable = 0;
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let identity = match path::normalize(entry.path()) {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path().display(), e);
                    unreadable += 1;
                    continue;
                }
            };
            if ContainerKind::from_path(entry.path()).is_video() {
                videos.push(identity);
            } else if identity.to_ascii_lowercase().ends_with(SIDECAR_EXTENSION) {
                subtitle_files.push(identity);
            }
        }

        let mut summary = SearchSummary {
            videos: videos.len(),
            failed: unreadable,
            ..Default::default()
        };

        let mut catalogued: Vec<(String, i64)> = Vec::with_capacity(videos.len());
        for video in &videos {
            match self.store.upsert_path(video) {
                Ok((record, inserted)) => {
                    if inserted {
                        summary.catalogued += 1;
                    }
                    catalogued.push((record.path, record.id));
                }
                Err(e) => {
                    report_failure("Failed to catalogue media", &[("path", video)], &e);
                    summary.failed += 1;
                }
            }
        }

        for subtitle in &subtitle_files {
            let dir_of = path::parent_dir(subtitle);
            let name = path::file_name(subtitle);
            for (video, id) in catalogued.iter().filter(|(v, _)| path::parent_dir(v) == dir_of) {
                let Some(found) = sidecar::match_sidecar(path::file_stem(video), name) else {
                    continue;
                };
                let descriptors: NameSet = [found.descriptor].into_iter().collect();
                match self.store.merge_sidecars(*id, &descriptors) {
                    Ok(added) => summary.sidecars_linked += added,
                    Err(e) => {
                        report_failure(
                            "Failed to link sidecar",
                            &[("path", video), ("sidecar", &name)],
                            &e,
                        );
                    }
                }
            }
        }

        if options.deep {
            for (video, _) in &catalogued {
                match self.check(video) {
                    Ok(_) => summary.checked += 1,
                    Err(_) => summary.failed += 1,
                }
            }
        }

        info!(
            "Search of {} done: {} video(s), {} new, {} sidecar(s) linked",
            dir.display(),
            summary.videos,
            summary.catalogued,
            summary.sidecars_linked
        );
        Ok(summary)
    }

    /// Checks every incomplete record and completes those found embedded.
    pub fn reconcile(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let pending = match self.store.incomplete() {
            Ok(records) => records,
            Err(e) => {
                report_failure("Failed to select incomplete records", &[], &e);
                return summary;
            }
        };
        info!("Reconciling {} incomplete record(s)", pending.len());

        for record in pending {
            summary.examined += 1;
            let report = match self.check(&record.path) {
                Ok(report) => report,
                Err(_) => {
                    summary.failed += 1;
                    continue;
                }
            };
            if !report.embedded {
                continue;
            }
            if report.state == ScanState::Complete {
                summary.completed += 1;
                continue;
            }
            match self.confirm_complete(report.id) {
                Ok(_) => summary.completed += 1,
                Err(_) => summary.failed += 1,
            }
        }

        info!(
            "Reconciliation done: {} examined, {} completed, {} failed",
            summary.examined, summary.completed, summary.failed
        );
        summary
    }
}
