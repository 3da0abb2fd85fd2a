//! Scan progress reporting.
//!
//! Each scanned directory (or listing file) goes through three steps:
//! listing starts, listing finishes with a file count, and the batch is
//! ingested. Reporters render these on **stderr** so stdout stays parseable
//! for scripts.

use std::io::Write;

/// A single progress event for one scan source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanProgressEvent {
    /// Listing of `source` has started.
    Listing { source: String },
    /// `source` was listed and yielded `files` raw records.
    Listed { source: String, files: usize },
    /// The records of `source` were routed into the index.
    Ingested {
        source: String,
        indexed: usize,
        unknown: usize,
        rejected: usize,
    },
}

/// Reports scan progress.
pub trait ScanProgressReporter: Send + Sync {
    fn report(&self, event: ScanProgressEvent);
}

/// Human-friendly progress on stderr, one line per event:
/// `scan /data/dumps  ingested 1,204 indexed, 3 unknown, 0 rejected`.
pub struct StderrProgress;

impl StderrProgress {
    fn line(event: &ScanProgressEvent) -> String {
        match event {
            ScanProgressEvent::Listing { source } => format!("scan {}  listing...", source),
            ScanProgressEvent::Listed { source, files } => {
                format!("scan {}  listed {} files", source, format_number(*files))
            }
            ScanProgressEvent::Ingested {
                source,
                indexed,
                unknown,
                rejected,
            } => format!(
                "scan {}  ingested {} indexed, {} unknown, {} rejected",
                source,
                format_number(*indexed),
                format_number(*unknown),
                format_number(*rejected)
            ),
        }
    }
}

impl ScanProgressReporter for StderrProgress {
    fn report(&self, event: ScanProgressEvent) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::line(&event));
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl JsonProgress {
    fn value(event: &ScanProgressEvent) -> serde_json::Value {
        match event {
            ScanProgressEvent::Listing { source } => serde_json::json!({
                "event": "listing",
                "source": source,
            }),
            ScanProgressEvent::Listed { source, files } => serde_json::json!({
                "event": "listed",
                "source": source,
                "files": files,
            }),
            ScanProgressEvent::Ingested {
                source,
                indexed,
                unknown,
                rejected,
            } => serde_json::json!({
                "event": "ingested",
                "source": source,
                "indexed": indexed,
                "unknown": unknown,
                "rejected": rejected,
            }),
        }
    }
}

impl ScanProgressReporter for JsonProgress {
    fn report(&self, event: ScanProgressEvent) {
        if let Ok(line) = serde_json::to_string(&Self::value(&event)) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ScanProgressReporter for NoProgress {
    fn report(&self, _event: ScanProgressEvent) {}
}

/// Group the digits of a count in threes: `1234567` → `1,234,567`.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|group| std::str::from_utf8(group).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

/// `--progress` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// The reporter for an explicit `--progress`, or human output when
    /// stderr is a terminal and nothing otherwise.
    pub fn select(requested: Option<ProgressMode>) -> Box<dyn ScanProgressReporter> {
        let mode = requested.unwrap_or(if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        });
        mode.reporter()
    }

    pub fn reporter(self) -> Box<dyn ScanProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
