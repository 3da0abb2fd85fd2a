//! Quarantine for files that could not be attributed or classified.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::FileRecord;

/// Which unknown-bucket a record lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnknownKey {
    /// No known collection prefix.
    Orphan,
    /// Known collection, no parseable date.
    Undated { collection: String },
    /// Known collection and date, but the name matched no convention.
    Snapshot { collection: String, date: String },
}

impl UnknownKey {
    /// Derive the bucket key from a record's attribution.
    pub fn for_record(record: &FileRecord) -> Self {
        match (&record.collection, &record.date) {
            (Some(collection), Some(date)) => UnknownKey::Snapshot {
                collection: collection.clone(),
                date: date.clone(),
            },
            (Some(collection), None) => UnknownKey::Undated {
                collection: collection.clone(),
            },
            (None, _) => UnknownKey::Orphan,
        }
    }

    fn collection(&self) -> Option<&str> {
        match self {
            UnknownKey::Orphan => None,
            UnknownKey::Undated { collection } | UnknownKey::Snapshot { collection, .. } => {
                Some(collection.as_str())
            }
        }
    }

    fn date(&self) -> Option<&str> {
        match self {
            UnknownKey::Snapshot { date, .. } => Some(date.as_str()),
            _ => None,
        }
    }

    /// Whether this bucket falls inside a `(collection?, date?)` query scope.
    ///
    /// `(None, None)` covers every bucket; a collection alone covers its
    /// dated and undated buckets; a date restricts to dated buckets.
    fn in_scope(&self, collection: Option<&str>, date: Option<&str>) -> bool {
        if let Some(c) = collection {
            if self.collection() != Some(c) {
                return false;
            }
        }
        match date {
            Some(d) => self.date() == Some(d),
            None => true,
        }
    }
}

/// Append-only store of unclassified or unattributed records.
///
/// Every record here has an empty descriptor, or no collection, or no date.
#[derive(Debug, Clone, Default)]
pub struct UnknownBucket {
    buckets: BTreeMap<UnknownKey, Vec<FileRecord>>,
}

impl UnknownBucket {
    pub(crate) fn push(&mut self, record: FileRecord) {
        debug_assert!(!record.is_classified());
        self.buckets
            .entry(UnknownKey::for_record(&record))
            .or_default()
            .push(record);
    }

    /// Records in scope. Orphans come first, then undated buckets, then
    /// snapshot buckets, each ordered by collection and date. Records keep
    /// ingestion order within a bucket.
    pub fn records(&self, collection: Option<&str>, date: Option<&str>) -> Vec<&FileRecord> {
        self.buckets
            .iter()
            .filter(|(key, _)| key.in_scope(collection, date))
            .flat_map(|(_, records)| records.iter())
            .collect()
    }

    pub fn count(&self, collection: Option<&str>, date: Option<&str>) -> usize {
        self.buckets
            .iter()
            .filter(|(key, _)| key.in_scope(collection, date))
            .map(|(_, records)| records.len())
            .sum()
    }

    /// Records of exactly one bucket.
    pub fn bucket(&self, key: &UnknownKey) -> &[FileRecord] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every non-empty bucket with its records.
    pub fn buckets(&self) -> impl Iterator<Item = (&UnknownKey, &[FileRecord])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
