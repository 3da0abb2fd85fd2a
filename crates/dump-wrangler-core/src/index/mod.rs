//! Corpus registry: collection → date → snapshot, plus the unknown bucket.
//!
//! [`CorpusIndex`] owns the ingestion pipeline and is the only writer of
//! [`SnapshotIndex`] and [`UnknownBucket`].
//!
//! # Routing
//!
//! | collection | date | descriptor | destination |
//! |------------|------|------------|-------------|
//! | yes | yes | non-empty | `SnapshotIndex[collection][date]` |
//! | yes | yes | empty | unknown `(collection, date)` |
//! | yes | no | - | unknown `(collection, undated)` |
//! | no | - | - | unknown orphans |
//!
//! Ingestion is append-only. Re-ingesting the same items adds duplicates;
//! scanning several directories is a plain union.
//!
//! The index has no internal locking. Callers that scan concurrently must
//! serialise calls to [`CorpusIndex::ingest`].

pub mod snapshot;
pub mod unknown;

pub use snapshot::SnapshotIndex;
pub use unknown::{UnknownBucket, UnknownKey};

use std::collections::{BTreeMap, BTreeSet};

use crate::descriptor::ContentDescriptor;
use crate::dump_info::{extract, KnownCollections};
use crate::error::{IndexError, Result};
use crate::models::{FileRecord, RawFileInfo};
use crate::name_parser::classify;

/// Outcome of one [`CorpusIndex::ingest`] batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records routed into a snapshot.
    pub indexed: usize,
    /// Records routed into the unknown bucket.
    pub unknown: usize,
    /// Items rejected as malformed; the rest of the batch was still ingested.
    pub rejected: Vec<IndexError>,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.indexed + self.unknown + self.rejected.len()
    }
}

/// Index of every ingested dump file.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    snapshots: BTreeMap<String, BTreeMap<String, SnapshotIndex>>,
    unknown: UnknownBucket,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute, classify, and route one batch of files.
    ///
    /// Malformed items are reported in [`IngestReport::rejected`] and do not
    /// stop the batch.
    pub fn ingest<I>(&mut self, items: I, known: &KnownCollections) -> IngestReport
    where
        I: IntoIterator<Item = RawFileInfo>,
    {
        let mut report = IngestReport::default();
        let mut classified: BTreeMap<(String, String), Vec<FileRecord>> = BTreeMap::new();

        for (position, raw) in items.into_iter().enumerate() {
            if let Err(reason) = raw.validate() {
                report.rejected.push(IndexError::MalformedRecord {
                    position,
                    name: raw.name,
                    reason,
                });
                continue;
            }

            let record = build_record(raw, known);
            if record.is_classified() {
                let key = (
                    record.collection.clone().unwrap_or_default(),
                    record.date.clone().unwrap_or_default(),
                );
                classified.entry(key).or_default().push(record);
                report.indexed += 1;
            } else {
                self.unknown.push(record);
                report.unknown += 1;
            }
        }

        for ((collection, date), records) in classified {
            self.snapshots
                .entry(collection.clone())
                .or_default()
                .entry(date.clone())
                .or_insert_with(|| SnapshotIndex::new(&collection, &date))
                .add_files(records);
        }

        report
    }

    /// Collections with at least one classified file.
    pub fn collections(&self) -> BTreeSet<&str> {
        self.snapshots.keys().map(String::as_str).collect()
    }

    /// Snapshot dates of a collection.
    pub fn snapshots(&self, collection: &str) -> Result<BTreeSet<&str>> {
        Ok(self
            .collection(collection)?
            .keys()
            .map(String::as_str)
            .collect())
    }

    /// Every collection with its snapshot dates.
    pub fn all_snapshots(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        self.snapshots
            .iter()
            .map(|(c, dates)| (c.as_str(), dates.keys().map(String::as_str).collect()))
            .collect()
    }

    pub fn snapshot(&self, collection: &str, date: &str) -> Result<&SnapshotIndex> {
        self.collection(collection)?
            .get(date)
            .ok_or_else(|| IndexError::SnapshotNotFound {
                collection: collection.to_string(),
                date: date.to_string(),
            })
    }

    /// Every snapshot, ordered by collection then date.
    pub fn snapshot_indexes(&self) -> impl Iterator<Item = &SnapshotIndex> {
        self.snapshots.values().flat_map(|dates| dates.values())
    }

    /// Number of files, classified and unknown, in a `(collection?, date?)`
    /// scope. `(None, None)` counts every file including orphans.
    pub fn file_count(&self, collection: Option<&str>, date: Option<&str>) -> usize {
        let classified: usize = self
            .snapshots_in_scope(collection, date)
            .into_iter()
            .map(SnapshotIndex::file_count)
            .sum();
        classified + self.unknown.count(collection, date)
    }

    /// Checksum file names of one snapshot, in ingestion order.
    pub fn checksum_files(&self, collection: &str, date: &str) -> Result<Vec<&str>> {
        Ok(self.snapshot(collection, date)?.checksum_files())
    }

    /// Checksum file names of every snapshot of a collection, dates ascending.
    pub fn collection_checksum_files(&self, collection: &str) -> Result<Vec<&str>> {
        Ok(self
            .collection(collection)?
            .values()
            .flat_map(SnapshotIndex::checksum_files)
            .collect())
    }

    /// Names of unknown files in scope.
    pub fn unknown_files(&self, collection: Option<&str>, date: Option<&str>) -> Vec<&str> {
        self.unknown
            .records(collection, date)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Unknown records in scope.
    pub fn unknown_records(
        &self,
        collection: Option<&str>,
        date: Option<&str>,
    ) -> Vec<&FileRecord> {
        self.unknown.records(collection, date)
    }

    pub fn unknown(&self) -> &UnknownBucket {
        &self.unknown
    }

    /// Classified records in scope whose descriptor satisfies `pred`.
    ///
    /// A named collection, or a named collection and date, must have been
    /// ingested; a date alone selects across every collection.
    pub fn select<F>(
        &self,
        collection: Option<&str>,
        date: Option<&str>,
        pred: F,
    ) -> Result<Vec<&FileRecord>>
    where
        F: Fn(&ContentDescriptor) -> bool,
    {
        match (collection, date) {
            (Some(c), Some(d)) => {
                self.snapshot(c, d)?;
            }
            (Some(c), None) => {
                self.collection(c)?;
            }
            _ => {}
        }
        Ok(self
            .snapshots_in_scope(collection, date)
            .into_iter()
            .flat_map(|snap| snap.select(&pred))
            .collect())
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty() && self.unknown.is_empty()
    }

    fn collection(&self, collection: &str) -> Result<&BTreeMap<String, SnapshotIndex>> {
        self.snapshots
            .get(collection)
            .ok_or_else(|| IndexError::CollectionNotFound {
                collection: collection.to_string(),
            })
    }

    fn snapshots_in_scope(
        &self,
        collection: Option<&str>,
        date: Option<&str>,
    ) -> Vec<&SnapshotIndex> {
        self.snapshot_indexes()
            .filter(|snap| {
                collection.map_or(true, |c| snap.collection() == c)
                    && date.map_or(true, |d| snap.date() == d)
            })
            .collect()
    }
}

fn build_record(raw: RawFileInfo, known: &KnownCollections) -> FileRecord {
    let stem = raw.stem().unwrap_or(raw.name.as_str()).to_string();
    let info = extract(&stem, known);
    let descriptor = info.remainder.map(classify).unwrap_or_default();
    FileRecord::from_raw(raw, info.collection, info.date, descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> KnownCollections {
        ["enwiki", "frwiki"].into_iter().collect()
    }

    fn raw(name: &str) -> RawFileInfo {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        RawFileInfo::new("/data", name, extension, 1)
    }

    #[test]
    fn test_routing_table() {
        let mut index = CorpusIndex::new();
        let report = index.ingest(
            vec![
                raw("enwiki-20201001-md5sums.txt"),
                raw("enwiki-20201001-mystery.txt"),
                raw("enwiki-latest-md5sums.txt"),
                raw("dewiki-20201001-md5sums.txt"),
            ],
            &known(),
        );
        assert_eq!(report.indexed, 1);
        assert_eq!(report.unknown, 3);
        assert!(report.rejected.is_empty());
        assert_eq!(report.total(), 4);

        assert_eq!(
            index.unknown_files(Some("enwiki"), Some("20201001")),
            vec!["enwiki-20201001-mystery.txt"]
        );
        assert_eq!(
            index.unknown().bucket(&UnknownKey::Undated {
                collection: "enwiki".into()
            })[0]
                .name,
            "enwiki-latest-md5sums.txt"
        );
        assert_eq!(
            index.unknown().bucket(&UnknownKey::Orphan)[0].name,
            "dewiki-20201001-md5sums.txt"
        );
    }

    #[test]
    fn test_date_without_remainder_is_unknown() {
        let mut index = CorpusIndex::new();
        index.ingest(vec![raw("enwiki-20201001.txt")], &known());
        assert!(index.collections().is_empty());
        assert_eq!(index.unknown_files(Some("enwiki"), Some("20201001")).len(), 1);
    }

    #[test]
    fn test_bad_date_never_classifies_third_part() {
        let mut index = CorpusIndex::new();
        index.ingest(vec![raw("enwiki-notadate-md5sums.txt")], &known());
        let records = index.unknown_records(Some("enwiki"), None);
        assert_eq!(records.len(), 1);
        assert!(records[0].descriptor.is_empty());
        assert_eq!(records[0].date, None);
    }

    #[test]
    fn test_classification_uses_stem() {
        let mut index = CorpusIndex::new();
        index.ingest(
            vec![raw("enwiki-20201001-pages-meta-history27.xml-p1000p2000.bz2")],
            &known(),
        );
        let snap = index.snapshot("enwiki", "20201001").unwrap();
        let d = snap.records()[0].descriptor;
        assert!(d.pages && d.rev_metadata && d.history && d.set);
        assert_eq!(snap.records()[0].extension, "bz2");
    }

    #[test]
    fn test_malformed_items_do_not_abort_batch() {
        let mut index = CorpusIndex::new();
        let report = index.ingest(
            vec![
                RawFileInfo::new("/data", "", "", 0),
                raw("enwiki-20201001-md5sums.txt"),
                RawFileInfo::new("/data", "enwiki-20201001-sha1sums.txt", "gz", 0),
            ],
            &known(),
        );
        assert_eq!(report.indexed, 1);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(
            report.rejected[0],
            IndexError::MalformedRecord { position: 0, .. }
        ));
        assert!(matches!(
            &report.rejected[1],
            IndexError::MalformedRecord { position: 2, name, .. } if name == "enwiki-20201001-sha1sums.txt"
        ));
        assert_eq!(index.file_count(None, None), 1);
    }

    #[test]
    fn test_not_found_is_distinct_from_empty() {
        let mut index = CorpusIndex::new();
        index.ingest(vec![raw("enwiki-20201001-pages-articles.xml.bz2")], &known());

        assert_eq!(index.checksum_files("enwiki", "20201001").unwrap(), Vec::<&str>::new());
        assert_eq!(
            index.checksum_files("enwiki", "20201020").unwrap_err(),
            IndexError::SnapshotNotFound {
                collection: "enwiki".into(),
                date: "20201020".into()
            }
        );
        let err = index.snapshots("frwiki").unwrap_err();
        assert!(err.is_not_found());
        assert!(index.select(Some("frwiki"), None, |_| true).is_err());
        assert!(index.select(None, Some("19990101"), |_| true).unwrap().is_empty());
    }

    #[test]
    fn test_select_across_scopes() {
        let mut index = CorpusIndex::new();
        index.ingest(
            vec![
                raw("enwiki-20201001-pages-articles-multistream.xml.bz2"),
                raw("enwiki-20201020-pages-articles-multistream.xml.bz2"),
                raw("frwiki-20201001-pages-articles-multistream.xml.bz2"),
                raw("frwiki-20201001-md5sums.txt"),
            ],
            &known(),
        );
        assert_eq!(index.select(None, None, |d| d.indexed).unwrap().len(), 3);
        assert_eq!(
            index.select(Some("enwiki"), None, |d| d.indexed).unwrap().len(),
            2
        );
        assert_eq!(
            index.select(None, Some("20201001"), |d| d.indexed).unwrap().len(),
            2
        );
        assert_eq!(
            index
                .select(Some("frwiki"), Some("20201001"), |d| d.checksum)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_collection_checksum_files_by_date() {
        let mut index = CorpusIndex::new();
        index.ingest(
            vec![
                raw("enwiki-20201020-md5sums.txt"),
                raw("enwiki-20201001-sha1sums.txt"),
                raw("enwiki-20201001-md5sums.txt"),
            ],
            &known(),
        );
        assert_eq!(
            index.collection_checksum_files("enwiki").unwrap(),
            vec![
                "enwiki-20201001-sha1sums.txt",
                "enwiki-20201001-md5sums.txt",
                "enwiki-20201020-md5sums.txt",
            ]
        );
    }

    #[test]
    fn test_incremental_batches_extend_snapshots() {
        let mut index = CorpusIndex::new();
        index.ingest(vec![raw("enwiki-20201001-md5sums.txt")], &known());
        index.ingest(vec![raw("enwiki-20201001-sha1sums.txt")], &known());
        assert_eq!(index.snapshot("enwiki", "20201001").unwrap().file_count(), 2);
        assert_eq!(index.all_snapshots()["enwiki"].len(), 1);
    }
}
