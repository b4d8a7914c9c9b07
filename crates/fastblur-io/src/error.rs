//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },

    /// Unsupported bit depth or color type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Raw stream shorter than its descriptor requires.
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the descriptor.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Parse error (raw descriptors).
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
