//! Error types for tablefake
//!
//! Every failure a table client can report is a [`TableError`]. The variants
//! mirror the answers a real table service gives, and [`TableError::status`]
//! maps each one to the HTTP status that service would have returned.
//!
//! ## Error Codes
//!
//! | Code | Status | Trigger |
//! |------|--------|---------|
//! | NotFound | 404 | read of a missing entity, strict delete of a missing entity |
//! | Conflict | 409 | add of an existing (partition key, row key) |
//! | PreconditionFailed | 412 | non-wildcard etag does not match the stored etag |
//! | TypeMismatch | 400 | entity cannot be interpreted as the requested shape |
//! | InvalidArgument | 400 | unknown transaction action tag |
//! | NotImplemented | 501 | string-form query filters |
//! | ConfigurationError | 500 | registry lookup of an unseeded table |
//! | Cancelled | 499 | cancellation token fired before the call ran |
//! | FixtureError | 500 | fixture document could not be read or parsed |

use crate::contract::ETag;
use thiserror::Error;

/// Result type alias for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Error types for the in-memory table client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Entity does not exist
    #[error("Not Found: entity {partition_key}/{row_key}")]
    NotFound {
        /// Partition key of the missing entity
        partition_key: String,
        /// Row key of the missing entity
        row_key: String,
    },

    /// Entity already exists
    #[error("Conflict: entity {partition_key}/{row_key} already exists")]
    Conflict {
        /// Partition key of the existing entity
        partition_key: String,
        /// Row key of the existing entity
        row_key: String,
    },

    /// Optimistic concurrency check failed
    #[error("Precondition Failed: expected etag {expected}, stored etag is {actual}")]
    PreconditionFailed {
        /// Etag supplied by the caller
        expected: ETag,
        /// Etag currently stored
        actual: ETag,
    },

    /// Entity cannot be interpreted as the requested shape
    #[error("Entity is not of the correct type (expected {expected}): {reason}")]
    TypeMismatch {
        /// Name of the requested shape
        expected: &'static str,
        /// Why the conversion failed
        reason: String,
    },

    /// Malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation is not supported by the in-memory client
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Registry has no seed data for a table
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cancellation was requested before the operation ran
    #[error("Operation cancelled")]
    Cancelled,

    /// Fixture document could not be loaded
    #[error("Fixture error: {0}")]
    Fixture(String),
}

impl TableError {
    /// Build a `NotFound` error for the given keys
    pub fn not_found(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        TableError::NotFound {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
        }
    }

    /// Build a `Conflict` error for the given keys
    pub fn conflict(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        TableError::Conflict {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
        }
    }

    /// Build a `TypeMismatch` error naming the requested shape
    pub fn type_mismatch<T: ?Sized>(reason: impl Into<String>) -> Self {
        TableError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// HTTP status the real table service answers with for this error
    pub fn status(&self) -> u16 {
        match self {
            TableError::NotFound { .. } => 404,
            TableError::Conflict { .. } => 409,
            TableError::PreconditionFailed { .. } => 412,
            TableError::TypeMismatch { .. } | TableError::InvalidArgument(_) => 400,
            TableError::NotImplemented(_) => 501,
            TableError::Cancelled => 499,
            TableError::Configuration(_) | TableError::Fixture(_) => 500,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::NotFound { .. } => "NotFound",
            TableError::Conflict { .. } => "Conflict",
            TableError::PreconditionFailed { .. } => "PreconditionFailed",
            TableError::TypeMismatch { .. } => "TypeMismatch",
            TableError::InvalidArgument(_) => "InvalidArgument",
            TableError::NotImplemented(_) => "NotImplemented",
            TableError::Configuration(_) => "ConfigurationError",
            TableError::Cancelled => "Cancelled",
            TableError::Fixture(_) => "FixtureError",
        }
    }

    /// Check if this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::NotFound { .. })
    }

    /// Check if this is a `Conflict` error
    pub fn is_conflict(&self) -> bool {
        matches!(self, TableError::Conflict { .. })
    }

    /// Check if this is a `PreconditionFailed` error
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, TableError::PreconditionFailed { .. })
    }

    /// Check if this is a `TypeMismatch` error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TableError::TypeMismatch { .. })
    }
}
