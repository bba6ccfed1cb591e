//! Error types for caskdb
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CaskError
pub type Result<T> = std::result::Result<T, CaskError>;

/// Unified error type for caskdb operations
#[derive(Debug, Error)]
pub enum CaskError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to open data file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record header: need 12 bytes, got {len}")]
    MalformedHeader { len: usize },

    #[error("Malformed record: header claims {expected} bytes, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    #[error("Record too large: {size} bytes does not fit the u32 wire format")]
    RecordTooLarge { size: u64 },

    // -------------------------------------------------------------------------
    // Fatal Errors (the handle must not be used afterwards)
    // -------------------------------------------------------------------------
    #[error("Data file integrity violation at offset {position}: {detail}")]
    Integrity { position: u64, detail: String },

    #[error("Durable write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Store is poisoned by an earlier failed write")]
    Poisoned,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CaskError {
    /// Whether this error leaves the store in a state that must not be used
    /// any further.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CaskError::Integrity { .. } | CaskError::WriteFailed(_) | CaskError::Poisoned
        )
    }
}
