//! Corpus statistics overview.
//!
//! A quick summary of what a scan found: file totals, how many were
//! classified, and a per-snapshot breakdown of file counts and sizes. Used by
//! `dumpw stats`.

use anyhow::Result;
use dump_wrangler_core::CorpusIndex;

use crate::ingest::ScanOutcome;

/// Per-snapshot breakdown line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SnapshotRow {
    collection: String,
    date: String,
    files: usize,
    size: u64,
}

fn snapshot_rows(index: &CorpusIndex) -> Vec<SnapshotRow> {
    index
        .snapshot_indexes()
        .map(|snap| SnapshotRow {
            collection: snap.collection().to_string(),
            date: snap.date().to_string(),
            files: snap.file_count(),
            size: snap.total_size(),
        })
        .collect()
}

/// Print the summary for a completed scan.
pub fn run_stats(outcome: &ScanOutcome) -> Result<()> {
    let index = &outcome.index;
    let rows = snapshot_rows(index);

    let classified_size: u64 = rows.iter().map(|r| r.size).sum();
    let unknown_size: u64 = index
        .unknown_records(None, None)
        .iter()
        .map(|r| r.size)
        .sum();

    println!("Dump Wrangler Corpus Stats");
    println!("==========================");
    println!();
    for batch in &outcome.batches {
        println!("  Scanned:     {}", batch.source);
    }
    println!();
    println!("  Files:       {}", index.file_count(None, None));
    println!(
        "  Indexed:     {} ({})",
        outcome.indexed(),
        format_bytes(classified_size)
    );
    println!(
        "  Unknown:     {} ({})",
        outcome.unknown(),
        format_bytes(unknown_size)
    );
    if outcome.rejected() > 0 {
        println!("  Rejected:    {}", outcome.rejected());
    }
    println!("  Collections: {}", index.collections().len());

    if !rows.is_empty() {
        println!();
        println!("  By snapshot:");
        println!(
            "  {:<24} {:<10} {:>6} {:>10}",
            "COLLECTION", "DATE", "FILES", "SIZE"
        );
        println!("  {}", "-".repeat(53));
        for row in &rows {
            println!(
                "  {:<24} {:<10} {:>6} {:>10}",
                row.collection,
                row.date,
                row.files,
                format_bytes(row.size)
            );
        }
    }

    println!();
    Ok(())
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
