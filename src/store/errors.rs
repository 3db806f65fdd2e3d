//! Store error types
//!
//! Error codes:
//! - STUDENTDB_STORAGE_IO_ERROR (ERROR severity)
//! - STUDENTDB_STORAGE_ENCODE_FAILED (ERROR severity)
//!
//! An unparsable data file is not an error: the store resets it to an
//! empty collection and logs the loss.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure while reading or writing the data file
    #[error("failed to {op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Collection could not be serialized
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "STUDENTDB_STORAGE_IO_ERROR",
            StoreError::Encode(_) => "STUDENTDB_STORAGE_ENCODE_FAILED",
        }
    }
}
