//! # Dump Wrangler CLI (`dumpw`)
//!
//! Every index command scans the configured directories (or a listing file)
//! first, then answers from the in-memory index.
//!
//! ## Usage
//!
//! ```bash
//! dumpw --config ./config/dumpw.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dumpw scan` | Scan and print an ingest summary |
//! | `dumpw stats` | Corpus summary per collection and date |
//! | `dumpw list` | Classified files, optionally filtered by tags |
//! | `dumpw checksums` | Checksum files in scope |
//! | `dumpw unknown` | Files that match no naming convention |
//! | `dumpw export` | JSON inventory of the index |
//! | `dumpw collections` | Known collection ids and their source |
//! | `dumpw dumps <collection>` | Snapshot dates published online |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dump_wrangler::progress::ProgressMode;
use dump_wrangler::{collections, config, export, ingest, report, stats};

/// Dump Wrangler CLI: classify and query local wiki dump files.
#[derive(Parser)]
#[command(
    name = "dumpw",
    about = "Dump Wrangler: classify, index, and query local wiki dump files",
    version,
    long_about = "Dump Wrangler scans directories of wiki dump files, attributes each file to a \
    collection and snapshot date from its name, classifies its content, and lists checksum \
    files, unknown files, or files matching content tags."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/dumpw.toml`. The file is optional; missing
    /// settings take their defaults.
    #[arg(long, global = true, default_value = "./config/dumpw.toml")]
    config: PathBuf,

    /// Directory to scan. Repeatable; replaces `scan.dirs`.
    #[arg(long = "dir", global = true)]
    dirs: Vec<PathBuf>,

    /// Read file metadata from a JSON listing instead of scanning directories.
    #[arg(long, global = true, conflicts_with = "dirs")]
    listing: Option<PathBuf>,

    /// Use the live collection list from the dump site.
    #[arg(long, global = true, conflicts_with = "offline")]
    online: bool,

    /// Use the offline collection list even if the config enables online mode.
    #[arg(long, global = true)]
    offline: bool,

    /// Scan progress on stderr. Defaults to `human` on a terminal, else `off`.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Scan dump directories and print an ingest summary.
    Scan {
        /// List files found per directory without classifying them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a corpus summary: totals and a per-snapshot breakdown.
    Stats,

    /// List classified files with their content tags.
    List {
        #[arg(long)]
        collection: Option<String>,

        /// Snapshot date (YYYYMMDD).
        #[arg(long)]
        date: Option<String>,

        /// Required content tags, comma separated (e.g. `articles,indexed`).
        #[arg(long)]
        tags: Option<String>,
    },

    /// List checksum files (md5sums, sha1sums).
    Checksums {
        #[arg(long)]
        collection: Option<String>,

        /// Snapshot date (YYYYMMDD).
        #[arg(long)]
        date: Option<String>,
    },

    /// List files that could not be attributed or classified.
    Unknown {
        #[arg(long)]
        collection: Option<String>,

        /// Snapshot date (YYYYMMDD).
        #[arg(long)]
        date: Option<String>,
    },

    /// Export the index as a JSON inventory.
    Export {
        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List known collection identifiers and where the list came from.
    Collections,

    /// List snapshot dates the dump site publishes for a collection.
    Dumps {
        /// Collection identifier (e.g. `enwiki`).
        collection: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = config::ConfigOverrides {
        dirs: cli.dirs,
        online: match (cli.online, cli.offline) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    };
    let cfg = config::load_config(&cli.config, &overrides)?;

    // Commands that don't scan
    match &cli.command {
        Commands::Collections => {
            return collections::run_collections(&cfg.collections).await;
        }
        Commands::Dumps { collection } => {
            return collections::run_dumps(&cfg.collections, collection).await;
        }
        _ => {}
    }

    let progress = ProgressMode::select(cli.progress);
    let known = collections::resolve(&cfg.collections).await?;
    let listing = cli.listing.as_deref();

    if let Commands::Scan { dry_run } = cli.command {
        return ingest::run_scan(&cfg, &known.known, listing, progress.as_ref(), dry_run).await;
    }

    let outcome = ingest::build_index(&cfg, &known.known, listing, progress.as_ref()).await?;
    let index = &outcome.index;

    match cli.command {
        Commands::Stats => {
            stats::run_stats(&outcome)?;
        }
        Commands::List {
            collection,
            date,
            tags,
        } => {
            report::run_list(index, collection.as_deref(), date.as_deref(), tags.as_deref())?;
        }
        Commands::Checksums { collection, date } => {
            report::run_checksums(index, collection.as_deref(), date.as_deref())?;
        }
        Commands::Unknown { collection, date } => {
            report::run_unknown(index, collection.as_deref(), date.as_deref())?;
        }
        Commands::Export { output } => {
            export::run_export(index, &known.provenance.to_string(), output.as_deref())?;
        }
        // Handled above
        Commands::Scan { .. } | Commands::Collections | Commands::Dumps { .. } => {}
    }

    Ok(())
}
