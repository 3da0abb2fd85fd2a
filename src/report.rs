//! File listings: classified records, checksum files, unknown files.
//!
//! Each command prints one entry per line on stdout. Scopes follow
//! `(collection?, date?)`; naming a collection or snapshot that was never
//! ingested is an error, while an unknown-file scope with nothing in it is
//! simply empty.

use anyhow::Result;
use dump_wrangler_core::{CorpusIndex, FileRecord, TagFilter};

/// Classified records in scope carrying every tag in `tags` (comma list).
pub fn list_records<'a>(
    index: &'a CorpusIndex,
    collection: Option<&str>,
    date: Option<&str>,
    tags: Option<&str>,
) -> Result<Vec<&'a FileRecord>> {
    let filter = match tags {
        Some(list) => TagFilter::parse(list)?,
        None => TagFilter::default(),
    };
    Ok(index.select(collection, date, |d| filter.matches(d))?)
}

/// Checksum file names in scope: one snapshot, every snapshot of a
/// collection, every snapshot of a date, or everything.
pub fn checksum_names<'a>(
    index: &'a CorpusIndex,
    collection: Option<&str>,
    date: Option<&str>,
) -> Result<Vec<&'a str>> {
    let names = match (collection, date) {
        (Some(c), Some(d)) => index.checksum_files(c, d)?,
        (Some(c), None) => index.collection_checksum_files(c)?,
        (None, Some(_)) => index
            .select(None, date, |d| d.checksum)?
            .into_iter()
            .map(|r| r.name.as_str())
            .collect(),
        (None, None) => {
            let mut names = Vec::new();
            for c in index.collections() {
                names.extend(index.collection_checksum_files(c)?);
            }
            names
        }
    };
    Ok(names)
}

pub fn run_list(
    index: &CorpusIndex,
    collection: Option<&str>,
    date: Option<&str>,
    tags: Option<&str>,
) -> Result<()> {
    for record in list_records(index, collection, date, tags)? {
        println!("{}\t{}", record.full_path().display(), record.descriptor);
    }
    Ok(())
}

pub fn run_checksums(
    index: &CorpusIndex,
    collection: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    for name in checksum_names(index, collection, date)? {
        println!("{}", name);
    }
    Ok(())
}

pub fn run_unknown(
    index: &CorpusIndex,
    collection: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    for record in index.unknown_records(collection, date) {
        println!("{}", record.full_path().display());
    }
    Ok(())
}
