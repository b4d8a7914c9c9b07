//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer or region error from the core types.
    #[error(transparent)]
    Core(#[from] fastblur_core::Error),

    /// Error while wrapping encoded output.
    #[error(transparent)]
    Io(#[from] fastblur_io::IoError),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
