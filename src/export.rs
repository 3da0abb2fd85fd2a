//! Export the corpus index as a JSON inventory.
//!
//! The inventory nests collections → dates → files, each file carrying its
//! descriptor, followed by the unknown buckets. Useful for handing a scan
//! result to other tools without rescanning.

use anyhow::Result;
use dump_wrangler_core::{ContentDescriptor, ContentTag, CorpusIndex, FileRecord, UnknownKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Serialize)]
struct ExportData<'a> {
    generated_at: String,
    known_collections: String,
    file_count: usize,
    collections: BTreeMap<&'a str, BTreeMap<&'a str, ExportSnapshot<'a>>>,
    unknown: Vec<ExportUnknown<'a>>,
}

#[derive(Serialize)]
struct ExportSnapshot<'a> {
    file_count: usize,
    total_size: u64,
    files: Vec<ExportFile<'a>>,
}

#[derive(Serialize)]
struct ExportFile<'a> {
    name: &'a str,
    path: &'a str,
    extension: &'a str,
    size: u64,
    tags: Vec<&'static str>,
    descriptor: &'a ContentDescriptor,
}

impl<'a> From<&'a FileRecord> for ExportFile<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            name: &record.name,
            path: &record.path,
            extension: &record.extension,
            size: record.size,
            tags: record
                .descriptor
                .tags()
                .into_iter()
                .map(ContentTag::as_str)
                .collect(),
            descriptor: &record.descriptor,
        }
    }
}

#[derive(Serialize)]
struct ExportUnknown<'a> {
    #[serde(flatten)]
    key: &'a UnknownKey,
    files: Vec<ExportFile<'a>>,
}

fn export_data<'a>(index: &'a CorpusIndex, known_collections: &str) -> ExportData<'a> {
    let mut collections: BTreeMap<&str, BTreeMap<&str, ExportSnapshot>> = BTreeMap::new();
    for snap in index.snapshot_indexes() {
        collections.entry(snap.collection()).or_default().insert(
            snap.date(),
            ExportSnapshot {
                file_count: snap.file_count(),
                total_size: snap.total_size(),
                files: snap.records().iter().map(ExportFile::from).collect(),
            },
        );
    }

    let unknown = index
        .unknown()
        .buckets()
        .map(|(key, records)| ExportUnknown {
            key,
            files: records.iter().map(ExportFile::from).collect(),
        })
        .collect();

    ExportData {
        generated_at: chrono::Utc::now().to_rfc3339(),
        known_collections: known_collections.to_string(),
        file_count: index.file_count(None, None),
        collections,
        unknown,
    }
}

/// Export the index as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(
    index: &CorpusIndex,
    known_collections: &str,
    output: Option<&Path>,
) -> Result<()> {
    let data = export_data(index, known_collections);
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} files in {} snapshots to {}",
                data.file_count,
                index.snapshot_indexes().count(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dump_wrangler_core::{KnownCollections, RawFileInfo};

    fn index() -> CorpusIndex {
        let known: KnownCollections = ["enwiki"].into_iter().collect();
        let mut index = CorpusIndex::new();
        index.ingest(
            vec![
                RawFileInfo::new("/d", "enwiki-20201001-md5sums.txt", "txt", 3),
                RawFileInfo::new(
                    "/d",
                    "enwiki-20201001-pages-meta-history1.xml-p1p812.7z",
                    "7z",
                    900,
                ),
                RawFileInfo::new("/d", "enwiki-latest-md5sums.txt", "txt", 3),
                RawFileInfo::new("/d", "notes.txt", "txt", 1),
            ],
            &known,
        );
        index
    }

    #[test]
    fn test_export_structure() {
        let index = index();
        let value = serde_json::to_value(export_data(&index, "bundled")).unwrap();

        assert_eq!(value["known_collections"], "bundled");
        assert_eq!(value["file_count"], 4);

        let snap = &value["collections"]["enwiki"]["20201001"];
        assert_eq!(snap["file_count"], 2);
        assert_eq!(snap["total_size"], 903);
        assert_eq!(snap["files"][0]["tags"], serde_json::json!(["checksum"]));
        assert_eq!(
            snap["files"][1]["tags"],
            serde_json::json!(["pages", "rev_metadata", "history", "set"])
        );
        assert_eq!(snap["files"][1]["descriptor"]["history"], true);

        let unknown = value["unknown"].as_array().unwrap();
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[0]["kind"], "orphan");
        assert_eq!(unknown[0]["files"][0]["name"], "notes.txt");
        assert_eq!(unknown[1]["kind"], "undated");
        assert_eq!(unknown[1]["collection"], "enwiki");
    }

    #[test]
    fn test_export_to_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out/inventory.json");
        run_export(&index(), "bundled", Some(&path)).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["file_count"], 4);
    }
}
