//! # fastblur-ops
//!
//! Image operations for the fastblur pipeline.
//!
//! Everything here works on linear-light [`PixelBuffer`]s; gamma decoding
//! and encoding happen at the edges in [`pipeline`].
//!
//! # Modules
//!
//! - [`filter`] - Recursive box filter and the multi-pass blur built on it
//! - [`resize`] - Fill-to-size crop and nearest-neighbour resampling
//! - [`pipeline`] - Decode, resize, blur, encode
//!
//! # Example
//!
//! ```rust
//! use fastblur_core::PixelBuffer;
//! use fastblur_ops::{blur, fill_resize, BlurParams, Geometry};
//!
//! let image = PixelBuffer::filled(320, 200, [0.25, 0.5, 0.75]);
//! let geometry: Geometry = "64x64@0.5".parse().unwrap();
//!
//! let small = fill_resize(&image, &geometry).unwrap();
//! let blurred = blur(small, &BlurParams::default());
//! assert_eq!(blurred.dimensions(), (64, 64));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Filter rows on the rayon pool (default)
//!
//! [`PixelBuffer`]: fastblur_core::PixelBuffer

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod pipeline;
pub mod resize;

pub use error::{OpsError, OpsResult};
pub use filter::{blur, box_filter, box_filter_row, BlurParams, BoxKernel, BufferPair};
pub use pipeline::Pipeline;
pub use resize::{fill_crop, fill_resize, resample_nearest, Geometry};
