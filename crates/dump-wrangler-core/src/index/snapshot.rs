//! Classified files of one `(collection, date)` snapshot.

use std::collections::BTreeMap;

use crate::descriptor::{ContentDescriptor, ContentTag};
use crate::models::FileRecord;

/// Append-only list of classified records sharing one collection and date.
///
/// Every record held here has at least one descriptor flag set. Only
/// [`CorpusIndex`](super::CorpusIndex) creates and extends snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotIndex {
    collection: String,
    date: String,
    records: Vec<FileRecord>,
}

impl SnapshotIndex {
    pub(crate) fn new(collection: &str, date: &str) -> Self {
        Self {
            collection: collection.to_string(),
            date: date.to_string(),
            records: Vec::new(),
        }
    }

    /// Append records in the given order.
    pub(crate) fn add_files(&mut self, records: impl IntoIterator<Item = FileRecord>) {
        for record in records {
            debug_assert!(!record.descriptor.is_empty());
            debug_assert_eq!(record.collection.as_deref(), Some(self.collection.as_str()));
            debug_assert_eq!(record.date.as_deref(), Some(self.date.as_str()));
            self.records.push(record);
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// All records, in ingestion order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn file_count(&self) -> usize {
        self.records.len()
    }

    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Records whose descriptor satisfies `pred`, in ingestion order.
    pub fn select<F>(&self, pred: F) -> Vec<&FileRecord>
    where
        F: Fn(&ContentDescriptor) -> bool,
    {
        self.records
            .iter()
            .filter(|r| pred(&r.descriptor))
            .collect()
    }

    /// Names of the checksum files (`md5sums`, `sha1sums`), in ingestion order.
    pub fn checksum_files(&self) -> Vec<&str> {
        self.select(|d| d.checksum)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Number of records carrying each tag. Tags with no records are omitted.
    pub fn tag_counts(&self) -> BTreeMap<ContentTag, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            for tag in record.descriptor.tags() {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFileInfo;
    use crate::name_parser::classify;

    fn record(name: &str, remainder: &str, size: u64) -> FileRecord {
        FileRecord::from_raw(
            RawFileInfo::new("/data", name, "bz2", size),
            Some("enwiki"),
            Some("20201001"),
            classify(remainder),
        )
    }

    fn snapshot() -> SnapshotIndex {
        let mut snap = SnapshotIndex::new("enwiki", "20201001");
        snap.add_files(vec![
            record("enwiki-20201001-md5sums.txt", "md5sums", 1),
            record(
                "enwiki-20201001-pages-articles-multistream.xml.bz2",
                "pages-articles-multistream.xml",
                100,
            ),
            record(
                "enwiki-20201001-pages-articles-multistream-index.txt.bz2",
                "pages-articles-multistream-index.txt",
                10,
            ),
            record("enwiki-20201001-sha1sums.txt", "sha1sums", 2),
        ]);
        snap
    }

    #[test]
    fn test_identity() {
        let snap = snapshot();
        assert_eq!(snap.collection(), "enwiki");
        assert_eq!(snap.date(), "20201001");
        assert_eq!(snap.file_count(), 4);
        assert_eq!(snap.total_size(), 113);
    }

    #[test]
    fn test_checksum_files_in_ingestion_order() {
        assert_eq!(
            snapshot().checksum_files(),
            vec!["enwiki-20201001-md5sums.txt", "enwiki-20201001-sha1sums.txt"]
        );
    }

    #[test]
    fn test_select_by_predicate() {
        let snap = snapshot();
        let indexed = snap.select(|d| d.indexed);
        assert_eq!(indexed.len(), 2);
        let index_only = snap.select(|d| d.indexed && !d.index);
        assert_eq!(index_only.len(), 1);
        assert!(index_only[0].name.contains("multistream.xml"));
        assert!(snap.select(|d| d.sql).is_empty());
    }

    #[test]
    fn test_tag_counts() {
        let counts = snapshot().tag_counts();
        assert_eq!(counts[&ContentTag::Checksum], 2);
        assert_eq!(counts[&ContentTag::Indexed], 2);
        assert_eq!(counts[&ContentTag::Index], 1);
        assert!(!counts.contains_key(&ContentTag::Sql));
    }
}
