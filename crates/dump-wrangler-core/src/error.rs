//! Error types for corpus queries and ingestion.
//!
//! A name that matches no known convention is not an error: it is routed to
//! the [`UnknownBucket`](crate::index::UnknownBucket). Errors here are the
//! conditions a caller must be able to tell apart from "no matching files".

use thiserror::Error;

/// Errors raised by the core index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// No classified file for this collection was ever ingested.
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    /// The collection is known but this snapshot date was never ingested.
    #[error("snapshot not found: {collection}-{date}")]
    SnapshotNotFound { collection: String, date: String },

    /// An input record was rejected during ingestion.
    #[error("malformed record #{position} ({name:?}): {reason}")]
    MalformedRecord {
        /// 0-based position of the item in its batch.
        position: usize,
        name: String,
        reason: String,
    },

    /// A content tag name outside the fixed vocabulary.
    #[error("unknown content tag: '{0}'")]
    UnknownTag(String),
}

impl IndexError {
    /// True for the two query-side "never ingested" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IndexError::CollectionNotFound { .. } | IndexError::SnapshotNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
