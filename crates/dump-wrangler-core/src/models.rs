//! Raw file metadata and indexed file records.
//!
//! [`RawFileInfo`] is what a directory-scanning collaborator hands to the
//! index. [`FileRecord`] is what the index stores once the name has been
//! attributed and classified.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::descriptor::ContentDescriptor;

/// Per-file metadata produced outside the core (directory scan, listing file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFileInfo {
    /// Directory containing the file.
    #[serde(default)]
    pub path: String,
    /// Base name including the extension.
    #[serde(default)]
    pub name: String,
    /// Text after the last `.` of the name, without the dot. Empty if none.
    #[serde(default)]
    pub extension: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl RawFileInfo {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        extension: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            extension: extension.into(),
            size,
        }
    }

    /// Check the required fields. Returns a reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("missing required field 'name'".to_string());
        }
        if self.path.is_empty() {
            return Err("missing required field 'path'".to_string());
        }
        if !self.extension.is_empty() && self.stem().is_none() {
            return Err(format!(
                "name does not end with extension '.{}'",
                self.extension
            ));
        }
        Ok(())
    }

    /// The name with `.{extension}` removed, or `None` if the name does not
    /// carry that extension.
    pub fn stem(&self) -> Option<&str> {
        if self.extension.is_empty() {
            return Some(&self.name);
        }
        self.name
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }
}

/// A classified (or quarantined) file held by the index.
///
/// Records are created once during ingestion and only ever handed out by
/// shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub collection: Option<String>,
    pub date: Option<String>,
    pub descriptor: ContentDescriptor,
}

impl FileRecord {
    pub(crate) fn from_raw(
        raw: RawFileInfo,
        collection: Option<&str>,
        date: Option<&str>,
        descriptor: ContentDescriptor,
    ) -> Self {
        Self {
            path: raw.path,
            name: raw.name,
            extension: raw.extension,
            size: raw.size,
            collection: collection.map(str::to_string),
            date: date.map(str::to_string),
            descriptor,
        }
    }

    /// Directory joined with the file name.
    pub fn full_path(&self) -> PathBuf {
        PathBuf::from(&self.path).join(&self.name)
    }

    /// True when the record has a collection, a date, and a classification.
    pub fn is_classified(&self) -> bool {
        self.collection.is_some() && self.date.is_some() && !self.descriptor.is_empty()
    }
}
