//! # Dump Wrangler
//!
//! Classify, index, and query local wiki dump files.
//!
//! Dump Wrangler scans directories of downloaded dump files, attributes
//! every file to a collection and snapshot date from its name, classifies
//! what it contains, and answers questions such as "which checksum files do
//! I have for this snapshot" or "which files match no naming convention".
//! Classification and indexing live in the pure `dump-wrangler-core` crate;
//! this crate supplies the filesystem, network, and CLI around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────────┐
//! │ Dump dirs /  │──▶│   Ingest    │──▶│   CorpusIndex    │
//! │ listing JSON │   │  (batches)  │   │ snapshots+unknown│
//! └──────────────┘   └──────▲──────┘   └────────┬─────────┘
//!                           │                   │
//!                 ┌─────────┴────────┐   ┌──────┴───────┐
//!                 │ Known collections│   │ Stats/Report │
//!                 │ bundled/file/web │   │    Export    │
//!                 └──────────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! dumpw --dir /data/dumps scan
//! dumpw --dir /data/dumps stats
//! dumpw --dir /data/dumps checksums --collection enwiki --date 20201001
//! dumpw --dir /data/dumps list --tags articles,indexed
//! dumpw --online dumps enwiki
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`collections`] | Known-collection list selection |
//! | [`online`] | Dump-site connectivity and listings |
//! | [`connector_fs`] | Directory scanning |
//! | [`ingest`] | Scan pipeline |
//! | [`progress`] | Scan progress on stderr |
//! | [`stats`] | Corpus summary |
//! | [`report`] | File listings |
//! | [`export`] | JSON inventory |

pub mod collections;
pub mod config;
pub mod connector_fs;
pub mod export;
pub mod ingest;
pub mod online;
pub mod progress;
pub mod report;
pub mod stats;
