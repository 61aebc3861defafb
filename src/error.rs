//! Error types for the prover
//!
//! The hash and scan loop are total; errors only arise at the edges,
//! when parsing jobs and talking to the filesystem.

use thiserror::Error;

/// Main error type for the prover
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed hex input
    #[error("Invalid hex in {field}: {source}")]
    Hex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// Hex decoded to the wrong number of bytes
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    Length {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Nonce range that cannot be scanned
    #[error("Invalid nonce range: {0}")]
    Range(String),

    /// Job file parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for prover operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn hex(field: &'static str, source: hex::FromHexError) -> Self {
        Self::Hex { field, source }
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }
}
