//! Error types for fastblur-core operations.
//!
//! Buffer construction and region selection are the only fallible
//! operations in this crate. Every constructor validates its input up front,
//! so a [`PixelView`](crate::PixelView) that exists is always in bounds.
//!
//! # Usage
//!
//! ```rust
//! use fastblur_core::{Error, PixelBuffer, Rect};
//!
//! let img = PixelBuffer::new(8, 8);
//! let err = img.crop(Rect::new(4, 4, 8, 8)).unwrap_err();
//! assert!(matches!(err, Error::InvalidRegion { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or slicing pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Region of interest extends beyond image bounds or has zero area.
    ///
    /// Returned by [`crop`](crate::PixelBuffer::crop) when the requested
    /// rectangle doesn't fit within the source dimensions.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: usize,
        /// Region Y origin
        ry: usize,
        /// Region width
        rw: usize,
        /// Region height
        rh: usize,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, when the sample buffer is too
    /// short for the requested size, or when the size overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Stride is too small for the given width.
    ///
    /// Measured in the units of the data it describes (`f32` samples for
    /// buffers, bytes for 8-bit input) and must cover one full row.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Image width
        width: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] for `rect` inside a `width`x`height` image.
    pub fn invalid_region(rect: crate::Rect, width: usize, height: usize) -> Self {
        Self::InvalidRegion {
            rx: rect.x,
            ry: rect.y,
            rw: rect.width,
            rh: rect.height,
            width,
            height,
        }
    }
}
