//! # Dump Wrangler Core
//!
//! Name classification and corpus indexing for archive dump files.
//!
//! Given nothing but file names, this crate works out which collection and
//! snapshot date a dump file belongs to and what kind of content it holds,
//! then groups the results so callers can select exactly the files they
//! need without opening any of them.
//!
//! This crate contains no filesystem, network, or async dependencies. It
//! consumes plain in-memory [`models::RawFileInfo`] values and a
//! [`dump_info::KnownCollections`] set handed in by the caller.
//!
//! ## Data Flow
//!
//! ```text
//! RawFileInfo ──▶ dump_info::extract ──▶ name_parser::classify ──▶ CorpusIndex
//!                 (collection, date,      (ContentDescriptor)       ├─ SnapshotIndex
//!                  remainder)                                       └─ UnknownBucket
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`descriptor`] | Content-kind vocabulary and the boolean descriptor |
//! | [`name_parser`] | Rule tree mapping a name remainder to a descriptor |
//! | [`dump_info`] | Collection/date prefix extraction |
//! | [`models`] | Raw file metadata and indexed file records |
//! | [`index`] | Snapshot, unknown-bucket, and corpus registries |
//! | [`error`] | Typed errors for queries and ingestion |

pub mod descriptor;
pub mod dump_info;
pub mod error;
pub mod index;
pub mod models;
pub mod name_parser;

pub use descriptor::{ContentDescriptor, ContentTag, TagFilter};
pub use dump_info::{extract, DumpInfo, KnownCollections};
pub use error::{IndexError, Result};
pub use index::{CorpusIndex, IngestReport, SnapshotIndex, UnknownBucket, UnknownKey};
pub use models::{FileRecord, RawFileInfo};
pub use name_parser::classify;
