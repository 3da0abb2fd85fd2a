//! Scan pipeline orchestration.
//!
//! Coordinates the scan flow: directory listing (or listing file) → raw
//! metadata batches → [`CorpusIndex`]. Directories are listed concurrently on
//! blocking worker threads; the batches are then ingested one at a time, in
//! configured order, by the single owner of the index.

use anyhow::{Context, Result};
use dump_wrangler_core::{CorpusIndex, IngestReport, KnownCollections, RawFileInfo};
use std::path::Path;

use crate::config::Config;
use crate::connector_fs;
use crate::progress::{ScanProgressEvent, ScanProgressReporter};

/// One batch of raw metadata and where it came from.
#[derive(Debug, Clone)]
pub struct Batch {
    pub source: String,
    pub items: Vec<RawFileInfo>,
}

/// Ingest outcome of one batch.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub source: String,
    pub report: IngestReport,
}

/// The populated index and per-batch ingest reports.
#[derive(Debug)]
pub struct ScanOutcome {
    pub index: CorpusIndex,
    pub batches: Vec<BatchSummary>,
}

impl ScanOutcome {
    pub fn indexed(&self) -> usize {
        self.batches.iter().map(|b| b.report.indexed).sum()
    }

    pub fn unknown(&self) -> usize {
        self.batches.iter().map(|b| b.report.unknown).sum()
    }

    pub fn rejected(&self) -> usize {
        self.batches.iter().map(|b| b.report.rejected.len()).sum()
    }
}

/// List every configured directory, or read the listing file, into batches.
///
/// Batches come back in configured directory order regardless of which
/// listing finishes first.
pub async fn discover(
    config: &Config,
    listing: Option<&Path>,
    progress: &dyn ScanProgressReporter,
) -> Result<Vec<Batch>> {
    if let Some(path) = listing {
        let source = path.display().to_string();
        progress.report(ScanProgressEvent::Listing {
            source: source.clone(),
        });
        let items = connector_fs::read_listing(path)?;
        progress.report(ScanProgressEvent::Listed {
            source: source.clone(),
            files: items.len(),
        });
        return Ok(vec![Batch { source, items }]);
    }

    let mut handles = Vec::with_capacity(config.scan.dirs.len());
    for dir in &config.scan.dirs {
        let source = dir.display().to_string();
        progress.report(ScanProgressEvent::Listing {
            source: source.clone(),
        });
        let dir = dir.clone();
        let scan = config.scan.clone();
        let handle = tokio::task::spawn_blocking(move || connector_fs::scan_dir(&dir, &scan));
        handles.push((source, handle));
    }

    let mut batches = Vec::with_capacity(handles.len());
    for (source, handle) in handles {
        let items = handle
            .await
            .with_context(|| format!("Scan of {} did not complete", source))??;
        progress.report(ScanProgressEvent::Listed {
            source: source.clone(),
            files: items.len(),
        });
        batches.push(Batch { source, items });
    }
    Ok(batches)
}

/// Ingest batches in order into a fresh index.
///
/// Rejected records are reported as warnings on stderr; they never stop the
/// scan.
pub fn ingest_batches(
    batches: Vec<Batch>,
    known: &KnownCollections,
    progress: &dyn ScanProgressReporter,
) -> ScanOutcome {
    let mut index = CorpusIndex::new();
    let mut summaries = Vec::with_capacity(batches.len());

    for batch in batches {
        let report = index.ingest(batch.items, known);
        progress.report(ScanProgressEvent::Ingested {
            source: batch.source.clone(),
            indexed: report.indexed,
            unknown: report.unknown,
            rejected: report.rejected.len(),
        });

        for err in &report.rejected {
            eprintln!("Warning: {}: {}", batch.source, err);
        }

        summaries.push(BatchSummary {
            source: batch.source,
            report,
        });
    }

    ScanOutcome {
        index,
        batches: summaries,
    }
}

/// Discover and ingest in one step.
pub async fn build_index(
    config: &Config,
    known: &KnownCollections,
    listing: Option<&Path>,
    progress: &dyn ScanProgressReporter,
) -> Result<ScanOutcome> {
    let batches = discover(config, listing, progress).await?;
    Ok(ingest_batches(batches, known, progress))
}

/// Run the scan command and print an ingest summary.
pub async fn run_scan(
    config: &Config,
    known: &KnownCollections,
    listing: Option<&Path>,
    progress: &dyn ScanProgressReporter,
    dry_run: bool,
) -> Result<()> {
    let batches = discover(config, listing, progress).await?;

    if dry_run {
        for batch in &batches {
            println!("scan {} (dry-run)", batch.source);
            println!("  files found: {}", batch.items.len());
        }
        return Ok(());
    }

    let outcome = ingest_batches(batches, known, progress);
    for batch in &outcome.batches {
        println!("scan {}", batch.source);
        println!("  files found: {}", batch.report.total());
        println!("  indexed: {}", batch.report.indexed);
        println!("  unknown: {}", batch.report.unknown);
        println!("  rejected: {}", batch.report.rejected.len());
    }
    if outcome.batches.len() > 1 {
        println!("total");
        println!("  indexed: {}", outcome.indexed());
        println!("  unknown: {}", outcome.unknown());
        println!("  rejected: {}", outcome.rejected());
    }
    println!("ok");
    Ok(())
}
