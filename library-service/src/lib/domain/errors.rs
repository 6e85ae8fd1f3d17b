use std::time::Duration;

use thiserror::Error;

/// Error for persistence operations.
///
/// Shared by every entity repository. Aggregate errors wrap it and decide how
/// each variant surfaces (e.g. `NotFound` on an id-addressed read).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A store-level unique index rejected the write.
    #[error("Duplicate value for unique field: {field}")]
    Duplicate { field: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
}
