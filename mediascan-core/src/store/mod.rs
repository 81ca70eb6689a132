// ============================================================================
// mediascan-core/src/store/mod.rs
// ============================================================================
//
// RECORD STORE: SQLite persistence for media records
//
// One table, `media`, keyed by the normalized path. Every statement runs in
// its own autocommit transaction; there is no transaction spanning a whole
// scan, so a crash can leave a record half-updated and the next pass
// converges it.
//
// KEY COMPONENTS:
// - MediaStore: connection wrapper with upsert-by-path and field updates
// - Column: the writable columns of the `media` table
// - locate_store: finds (or creates) the store file in the asset directory

mod locate;

pub use locate::{find_newest_file, locate_store};

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params, params_from_iter};

use crate::error::{CoreError, CoreResult};
use crate::record::{MediaRecord, NameSet};

/// Name of the only table.
pub const MEDIA_TABLE: &str = "media";

/// Text stored in a flag column once the flag is set.
pub const FLAG_TRUE: &str = "True";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS media (
    id INTEGER UNIQUE PRIMARY KEY AUTOINCREMENT,
    filepath TEXT NOT NULL UNIQUE,
    audio TEXT,
    subs TEXT,
    embedded TEXT,
    misc TEXT,
    duplicate TEXT,
    complete TEXT
)";

const RECORD_SELECT: &str =
    "SELECT id, filepath, audio, subs, embedded, misc, duplicate, complete FROM media";

/// Writable columns of the `media` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Audio,
    Subtitles,
    Embedded,
    Sidecars,
    Duplicates,
    Complete,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Audio => "audio",
            Column::Subtitles => "subs",
            Column::Embedded => "embedded",
            Column::Sidecars => "misc",
            Column::Duplicates => "duplicate",
            Column::Complete => "complete",
        }
    }
}

/// Handle on the media catalog.
pub struct MediaStore {
    conn: Connection,
}

impl MediaStore {
    /// Opens the store at `path`, creating the file and schema if needed.
    pub fn create(path: &Path) -> CoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| connection_error(path, e))?;
        Self::with_connection(conn, path)
    }

    /// Opens an existing store file. A missing file is a connection error.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| connection_error(path, e))?;
        Self::with_connection(conn, path)
    }

    /// Store that lives only as long as the handle.
    pub fn open_in_memory() -> CoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CoreError::StoreConnection(format!("in-memory store: {e}")))?;
        Self::with_connection(conn, Path::new(":memory:"))
    }

    fn with_connection(conn: Connection, path: &Path) -> CoreResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| connection_error(path, e))?;
        log::debug!("Opened media store at {}", path.display());
        Ok(Self { conn })
    }

    /// Record stored under `path`, if any.
    pub fn find_by_path(&self, path: &str) -> CoreResult<Option<MediaRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("{RECORD_SELECT} WHERE filepath = ?1"),
                params![path],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    pub fn get(&self, id: i64) -> CoreResult<MediaRecord> {
        self.conn
            .query_row(&format!("{RECORD_SELECT} WHERE id = ?1"), params![id], row_to_record)
            .optional()?
            .ok_or_else(|| CoreError::NotFound(format!("media record {id}")))
    }

    /// Returns the record for `path`, inserting an empty one first if the
    /// path is new. The flag tells whether an insert happened.
    pub fn upsert_path(&self, path: &str) -> CoreResult<(MediaRecord, bool)> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO media (filepath) VALUES (?1)",
            params![path],
        )? > 0;
        if inserted {
            log::debug!("Catalogued new media path {path}");
        }
        let record = self
            .find_by_path(path)?
            .ok_or_else(|| CoreError::NotFound(format!("media record for {path}")))?;
        Ok((record, inserted))
    }

    /// Sets `values` on record `id`. Completed records are left untouched.
    ///
    /// Returns `false` when no row was updated.
    pub fn update_columns(&self, id: i64, values: &[(Column, Option<String>)]) -> CoreResult<bool> {
        if values.is_empty() {
            return Ok(false);
        }
        let set_clause = values
            .iter()
            .enumerate()
            .map(|(idx, (column, _))| format!("{} = ?{}", column.name(), idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {MEDIA_TABLE} SET {set_clause} WHERE id = ?{} AND complete IS NOT '{FLAG_TRUE}'",
            values.len() + 1
        );

        let mut bind: Vec<rusqlite::types::Value> = values
            .iter()
            .map(|(_, value)| match value {
                Some(text) => rusqlite::types::Value::Text(text.clone()),
                None => rusqlite::types::Value::Null,
            })
            .collect();
        bind.push(rusqlite::types::Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind))?;
        Ok(changed > 0)
    }

    /// Persists the language lists and name sets of `record`.
    ///
    /// The language columns are written as empty text rather than NULL once
    /// an extraction has succeeded, so an empty result stays distinguishable
    /// from a file that was never inspected.
    pub fn save_findings(&self, record: &MediaRecord) -> CoreResult<bool> {
        let languages = |set: &NameSet| {
            set.to_stored()
                .or_else(|| record.extracted.then(String::new))
        };
        self.update_columns(
            record.id,
            &[
                (Column::Audio, languages(&record.audio_languages)),
                (Column::Subtitles, languages(&record.subtitle_languages)),
                (Column::Sidecars, record.sidecars.to_stored()),
                (Column::Duplicates, record.duplicates.to_stored()),
            ],
        )
    }

    /// Merges `sidecars` into the sidecar set of record `id` and returns how
    /// many were stored. A complete record accepts none.
    pub fn merge_sidecars(&self, id: i64, sidecars: &NameSet) -> CoreResult<usize> {
        let mut record = self.get(id)?;
        let added = record.sidecars.merge(sidecars);
        if added == 0 {
            return Ok(0);
        }
        let stored = self.update_columns(id, &[(Column::Sidecars, record.sidecars.to_stored())])?;
        Ok(if stored { added } else { 0 })
    }

    pub fn mark_embedded(&self, id: i64) -> CoreResult<bool> {
        self.update_columns(id, &[(Column::Embedded, Some(FLAG_TRUE.to_string()))])
    }

    /// Sets the complete flag, and the embedded flag with it when requested.
    pub fn mark_complete(&self, id: i64, embedded: bool) -> CoreResult<bool> {
        let mut values = vec![(Column::Complete, Some(FLAG_TRUE.to_string()))];
        if embedded {
            values.push((Column::Embedded, Some(FLAG_TRUE.to_string())));
        }
        self.update_columns(id, &values)
    }

    /// Every record still needing a scan, in id order.
    pub fn incomplete(&self) -> CoreResult<Vec<MediaRecord>> {
        self.collect_records(
            &format!("{RECORD_SELECT} WHERE complete IS NOT '{FLAG_TRUE}' ORDER BY id"),
            params![],
        )
    }

    /// Every record, in id order.
    pub fn all(&self) -> CoreResult<Vec<MediaRecord>> {
        self.collect_records(&format!("{RECORD_SELECT} ORDER BY id"), params![])
    }

    /// Paths containing `fragment` (SQL `LIKE`, so ASCII case-insensitive),
    /// excluding `exclude` itself.
    pub fn paths_containing(&self, fragment: &str, exclude: &str) -> CoreResult<Vec<String>> {
        let pattern = format!("%{}%", escape_like(fragment));
        let mut stmt = self.conn.prepare(
            "SELECT filepath FROM media WHERE filepath LIKE ?1 ESCAPE '\\' AND filepath != ?2 ORDER BY id",
        )?;
        let paths = stmt
            .query_map(params![pattern, exclude], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paths)
    }

    fn collect_records<P: rusqlite::Params>(&self, sql: &str, params: P) -> CoreResult<Vec<MediaRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params, row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<MediaRecord> {
    let audio: Option<String> = row.get(2)?;
    let subs: Option<String> = row.get(3)?;
    let embedded: Option<String> = row.get(4)?;
    let misc: Option<String> = row.get(5)?;
    let duplicate: Option<String> = row.get(6)?;
    let complete: Option<String> = row.get(7)?;

    Ok(MediaRecord {
        id: row.get(0)?,
        path: row.get(1)?,
        extracted: audio.is_some() || subs.is_some(),
        audio_languages: NameSet::from_stored(audio.as_deref()),
        subtitle_languages: NameSet::from_stored(subs.as_deref()),
        embedded: embedded.as_deref() == Some(FLAG_TRUE),
        sidecars: NameSet::from_stored(misc.as_deref()),
        duplicates: NameSet::from_stored(duplicate.as_deref()),
        complete: complete.as_deref() == Some(FLAG_TRUE),
    })
}

fn connection_error(path: &Path, err: rusqlite::Error) -> CoreError {
    CoreError::StoreConnection(format!("{}: {}", path.display(), err))
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
