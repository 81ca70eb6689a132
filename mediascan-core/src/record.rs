//! Domain model of a catalogued media file.

use std::fmt;

/// Delimiter used when a [`NameSet`] is written to a text column.
pub const SET_DELIMITER: &str = ",";

/// Ordered, duplicate-free collection of names.
///
/// Insertion order is preserved; inserting a name already present is a no-op.
/// The comma-joined form only exists at the storage boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet(Vec<String>);

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored column value; `None` and empty strings give an empty set.
    pub fn from_stored(value: Option<&str>) -> Self {
        let mut set = Self::new();
        if let Some(value) = value {
            set.extend(value.split(SET_DELIMITER).map(str::to_string));
        }
        set
    }

    /// Inserts `name`, returning `true` if it was not present. Empty names
    /// are ignored.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    /// Set union in place; returns the number of names added.
    pub fn merge(&mut self, other: &NameSet) -> usize {
        other.iter().filter(|name| self.insert(name.as_str())).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column value: `None` for an empty set, comma-joined otherwise.
    pub fn to_stored(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.join(SET_DELIMITER))
        }
    }
}

impl<S: Into<String>> Extend<S> for NameSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// One row of the `media` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: i64,
    /// Normalized identity string, see [`crate::path::normalize`]
    pub path: String,
    pub audio_languages: NameSet,
    pub subtitle_languages: NameSet,
    pub embedded: bool,
    pub sidecars: NameSet,
    pub duplicates: NameSet,
    pub complete: bool,
    /// A container extraction has succeeded at least once (the language
    /// columns are no longer NULL)
    pub extracted: bool,
}

impl MediaRecord {
    pub fn state(&self) -> ScanState {
        ScanState::of(self)
    }
}

/// Position of a record in the scan lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Discovered, nothing extracted yet
    New,
    /// Some tracks recorded, terminal criteria not met
    Partial,
    /// Audio and subtitle tracks found inside the container
    Embedded,
    /// Exempt from further scans
    Complete,
}

impl ScanState {
    pub fn of(record: &MediaRecord) -> Self {
        if record.complete {
            ScanState::Complete
        } else if record.embedded {
            ScanState::Embedded
        } else if !record.extracted {
            ScanState::New
        } else {
            ScanState::Partial
        }
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanState::New => "new",
            ScanState::Partial => "partial",
            ScanState::Embedded => "embedded",
            ScanState::Complete => "complete",
        };
        f.write_str(label)
    }
}
