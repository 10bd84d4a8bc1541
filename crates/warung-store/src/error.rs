//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / serde_json error                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds collection/path context               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosError (service layer) ← What the presentation layer sees           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file system failure while reading or rewriting the
    /// backing document.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document exists but cannot be parsed.
    ///
    /// Surfaced explicitly rather than silently treating the store as
    /// empty, so a damaged data file is never overwritten by accident.
    #[error("Store document at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    /// A record could not be serialized into the collection document.
    #[error("Failed to encode {collection} record: {source}")]
    Encode {
        collection: &'static str,
        source: serde_json::Error,
    },

    /// A stored record does not match the expected shape.
    #[error("Failed to decode {collection} record: {source}")]
    Decode {
        collection: &'static str,
        source: serde_json::Error,
    },

    /// Lookup miss for an edit/delete operation.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
