//! Integration tests for the public corpus-indexing API.
//!
//! Drives ingestion the way a directory-scan collaborator would: a batch of
//! raw file metadata plus a known-collection set.

use std::collections::BTreeSet;

use dump_wrangler_core::{
    classify, extract, ContentDescriptor, ContentTag, CorpusIndex, IndexError, KnownCollections,
    RawFileInfo, TagFilter,
};

fn known() -> KnownCollections {
    ["enwiki", "frwiki", "simplewiki"].into_iter().collect()
}

fn file(dir: &str, name: &str) -> RawFileInfo {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();
    RawFileInfo::new(dir, name, extension, 1024)
}

fn dump_listing() -> Vec<RawFileInfo> {
    [
        "enwiki-20201001-md5sums.txt",
        "enwiki-20201001-sha1sums.txt",
        "enwiki-20201001-pages-articles-multistream.xml.bz2",
        "enwiki-20201001-pages-articles-multistream-index.txt.bz2",
        "enwiki-20201001-pages-articles-multistream1.xml-p1p41242.bz2",
        "enwiki-20201001-pages-articles-multistream-index1.txt-p1p41242.bz2",
        "enwiki-20201001-pages-meta-history1.xml-p1p812.7z",
        "enwiki-20201001-stub-meta-current.xml.gz",
        "enwiki-20201001-abstract.xml.gz",
        "enwiki-20201001-categorylinks.sql.gz",
        "enwiki-20201001-all-titles-in-ns0.gz",
        "enwiki-20201001-siteinfo-namespaces.json.gz",
        "enwiki-20201001-dumpruninfo.txt",
        "enwiki-latest-md5sums.txt",
        "simplewiki-20201020-md5sums.txt",
        "notes.txt",
    ]
    .iter()
    .map(|name| file("/data", name))
    .collect()
}

#[test]
fn test_checksum_names_classify_as_checksum_only() {
    for name in ["md5sums", "sha1sums"] {
        assert_eq!(
            classify(name),
            ContentDescriptor::with_tags(&[ContentTag::Checksum])
        );
    }
}

#[test]
fn test_history_set_descriptor() {
    assert_eq!(
        classify("pages-meta-history27.xml-p1000p2000"),
        ContentDescriptor::with_tags(&[
            ContentTag::Pages,
            ContentTag::RevMetadata,
            ContentTag::History,
            ContentTag::Set,
        ])
    );
}

#[test]
fn test_multistream_index_set_descriptor() {
    assert_eq!(
        classify("pages-articles-multistream-index3.txt-p1p5000"),
        ContentDescriptor::with_tags(&[
            ContentTag::Pages,
            ContentTag::Articles,
            ContentTag::Indexed,
            ContentTag::Index,
            ContentTag::Set,
        ])
    );
}

#[test]
fn test_extract_examples() {
    let enwiki: KnownCollections = ["enwiki"].into_iter().collect();

    let info = extract("enwiki-20201001-md5sums", &enwiki);
    assert_eq!(
        (info.collection, info.date, info.remainder),
        (Some("enwiki"), Some("20201001"), Some("md5sums"))
    );

    let info = extract("enwiki-notadate-md5sums", &enwiki);
    assert_eq!(
        (info.collection, info.date, info.remainder),
        (Some("enwiki"), None, None)
    );
}

#[test]
fn test_two_snapshots_of_one_collection() {
    let mut index = CorpusIndex::new();
    index.ingest(
        vec![
            file("/data1", "enwiki-20201001-md5sums.txt"),
            file("/data1", "enwiki-20201020-md5sums.txt"),
        ],
        &known(),
    );

    assert_eq!(
        index.snapshots("enwiki").unwrap(),
        BTreeSet::from(["20201001", "20201020"])
    );
    assert_eq!(index.file_count(Some("enwiki"), None), 2);
    assert_eq!(
        index.checksum_files("enwiki", "20201001").unwrap(),
        vec!["enwiki-20201001-md5sums.txt"]
    );
}

#[test]
fn test_unknown_collection_goes_to_global_orphans() {
    let mut index = CorpusIndex::new();
    index.ingest(
        vec![
            file("/data", "enwiki-20201001-md5sums.txt"),
            file("/data", "dewiki-20201001-md5sums.txt"),
        ],
        &known(),
    );

    assert!(index
        .unknown_files(None, None)
        .contains(&"dewiki-20201001-md5sums.txt"));
    assert!(!index
        .unknown_files(Some("enwiki"), None)
        .contains(&"dewiki-20201001-md5sums.txt"));
}

#[test]
fn test_dated_name_without_description_stays_with_its_snapshot() {
    let mut index = CorpusIndex::new();
    let report = index.ingest(vec![file("/data", "enwiki-20201001.txt")], &known());

    assert_eq!(report.unknown, 1);
    assert_eq!(
        index.unknown_files(Some("enwiki"), Some("20201001")),
        vec!["enwiki-20201001.txt"]
    );
    assert!(index.snapshots("enwiki").is_err());
}

#[test]
fn test_reingesting_doubles_counts() {
    let mut index = CorpusIndex::new();
    let first = index.ingest(dump_listing(), &known());
    let once = index.file_count(None, None);
    assert_eq!(once, dump_listing().len());

    let second = index.ingest(dump_listing(), &known());
    assert_eq!(first, second);
    assert_eq!(index.file_count(None, None), once * 2);
    assert_eq!(
        index.checksum_files("enwiki", "20201001").unwrap().len(),
        4
    );
}

#[test]
fn test_snapshots_of_unknown_collection_is_not_found() {
    let mut index = CorpusIndex::new();
    index.ingest(dump_listing(), &known());

    let err = index.snapshots("nonexistent-collection").unwrap_err();
    assert_eq!(
        err,
        IndexError::CollectionNotFound {
            collection: "nonexistent-collection".into()
        }
    );
    assert!(err.is_not_found());
}

#[test]
fn test_realistic_listing() {
    let mut index = CorpusIndex::new();
    let report = index.ingest(dump_listing(), &known());

    // dumpruninfo, enwiki-latest, notes
    assert_eq!(report.unknown, 3);
    assert_eq!(report.indexed, 13);
    assert!(report.rejected.is_empty());

    assert_eq!(
        index.collections(),
        BTreeSet::from(["enwiki", "simplewiki"])
    );
    assert_eq!(index.file_count(None, None), 16);
    assert_eq!(index.file_count(Some("enwiki"), None), 14);
    assert_eq!(index.file_count(Some("enwiki"), Some("20201001")), 13);

    assert_eq!(index.unknown_files(None, None).len(), 3);
    assert_eq!(index.unknown_files(Some("enwiki"), None).len(), 2);
    assert_eq!(
        index.unknown_files(Some("enwiki"), Some("20201001")),
        vec!["enwiki-20201001-dumpruninfo.txt"]
    );
    assert_eq!(index.checksum_files("enwiki", "20201001").unwrap().len(), 2);
}

#[test]
fn test_descriptor_predicate_reports() {
    let mut index = CorpusIndex::new();
    index.ingest(dump_listing(), &known());

    let multistream = TagFilter::parse("articles,indexed").unwrap();
    let hits = index
        .select(Some("enwiki"), Some("20201001"), |d| multistream.matches(d))
        .unwrap();
    assert_eq!(hits.len(), 4);

    let set_members = index.select(None, None, |d| d.set).unwrap();
    let names: Vec<&str> = set_members.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "enwiki-20201001-pages-articles-multistream1.xml-p1p41242.bz2",
            "enwiki-20201001-pages-articles-multistream-index1.txt-p1p41242.bz2",
            "enwiki-20201001-pages-meta-history1.xml-p1p812.7z",
        ]
    );

    let snap = index.snapshot("enwiki", "20201001").unwrap();
    let counts = snap.tag_counts();
    assert_eq!(counts[&ContentTag::Sql], 1);
    assert_eq!(counts[&ContentTag::Titles], 1);
    assert_eq!(counts[&ContentTag::Namespaces], 1);
    assert_eq!(counts[&ContentTag::Abstracts], 1);
    assert_eq!(counts[&ContentTag::Current], 1);
    assert!(!counts.contains_key(&ContentTag::Stubs));
}

#[test]
fn test_every_indexed_record_is_classified() {
    let mut index = CorpusIndex::new();
    index.ingest(dump_listing(), &known());

    for snap in index.snapshot_indexes() {
        for record in snap.records() {
            assert!(!record.descriptor.is_empty(), "{}", record.name);
            assert_eq!(record.collection.as_deref(), Some(snap.collection()));
            assert_eq!(record.date.as_deref(), Some(snap.date()));
        }
    }
    for record in index.unknown_records(None, None) {
        assert!(
            record.descriptor.is_empty() || record.collection.is_none() || record.date.is_none(),
            "{} should not be quarantined",
            record.name
        );
    }
}

#[test]
fn test_collection_set_is_caller_supplied() {
    let mut index = CorpusIndex::new();
    let only_fr: KnownCollections = ["frwiki"].into_iter().collect();
    index.ingest(vec![file("/data", "enwiki-20201001-md5sums.txt")], &only_fr);
    assert!(index.collections().is_empty());
    assert_eq!(index.unknown_files(None, None).len(), 1);

    index.ingest(vec![file("/data", "enwiki-20201001-md5sums.txt")], &known());
    assert_eq!(index.collections(), BTreeSet::from(["enwiki"]));
}
