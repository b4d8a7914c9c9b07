//! # fastblur-core
//!
//! Core types for the fastblur pipeline.
//!
//! - [`PixelBuffer`] - Owned linear-light RGB `f32` image with grow-only storage
//! - [`PixelView`] - Borrowed, strided window (crops never copy)
//! - [`transpose`] - Tiled transpose used to run vertical passes horizontally
//! - [`Rect`] - Crop regions
//! - [`PixelLayout`] - Byte offsets of R/G/B in interleaved 8-bit input
//!
//! ## Crate Structure
//!
//! This crate is the foundation of fastblur and has no internal dependencies:
//!
//! ```text
//! fastblur-core (this crate)
//!    ^
//!    |
//!    +-- fastblur-transfer (gamma decode/encode)
//!    +-- fastblur-io (PNG and raw codecs)
//!    +-- fastblur-ops (box filter, geometry, pipeline)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use format::PixelLayout;
pub use image::{transpose, PixelBuffer, PixelView, Rgb, CHANNELS};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use fastblur_core::prelude::*;
///
/// let img = PixelBuffer::new(4, 4);
/// let view: PixelView<'_> = img.crop(Rect::new(1, 1, 2, 2)).unwrap();
/// assert_eq!(view.width(), 2);
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::PixelLayout;
    pub use crate::image::{transpose, PixelBuffer, PixelView, Rgb, CHANNELS};
    pub use crate::rect::Rect;
}
