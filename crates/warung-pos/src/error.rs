//! # Service Error Types
//!
//! The error type the presentation layer sees: every failure from the
//! rules layer or the document store, surfaced as one operator-facing
//! message per failed operation. Nothing propagates past the operation
//! that triggered it, and a failed operation performs no writes.

use thiserror::Error;

use warung_core::CoreError;
use warung_store::StoreError;

/// Service operation errors.
#[derive(Debug, Error)]
pub enum PosError {
    /// Business rule violation (empty cart, insufficient stock, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Document store failure (I/O, corrupt document, lookup miss).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<warung_core::ValidationError> for PosError {
    fn from(err: warung_core::ValidationError) -> Self {
        PosError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type PosResult<T> = Result<T, PosError>;
