//! # fastblur-transfer
//!
//! Gamma transfer between 8-bit encoded pixels and linear light.
//!
//! Blurring is done on linear values so that averaging two pixels averages
//! their light, not their encoded brightness. This crate provides the decode
//! step that feeds the blur and the encode step that turns its result back
//! into bytes.
//!
//! # Terminology
//!
//! - **EOTF**: Encoded -> Linear (decode)
//! - **OETF**: Linear -> Encoded (encode)
//!
//! # Modes
//!
//! | Mode | Curve | Decode | Encode |
//! |------|-------|--------|--------|
//! | [`GammaMode::Exact`] | 2.2 | lookup table | `powf` |
//! | [`GammaMode::Fast`] | 2.0 | square | square root |
//!
//! # Usage
//!
//! ```rust
//! use fastblur_core::PixelLayout;
//! use fastblur_transfer::{Gamma, GammaMode};
//!
//! let gamma = Gamma::new(GammaMode::Exact);
//!
//! // 2x1 RGB bitmap -> linear buffer
//! let bytes = [128u8, 128, 128, 255, 0, 0];
//! let linear = gamma.decode_image(&bytes, 2, 1, 6, PixelLayout::RGB).unwrap();
//! assert!((linear.pixel(0, 0)[0] - 0.2195).abs() < 1e-3);
//!
//! // And back
//! assert_eq!(gamma.encode_image(&linear.view()), bytes);
//! ```
//!
//! # Dependencies
//!
//! - [`fastblur-core`] - Pixel buffers and layouts
//!
//! # Used By
//!
//! - `fastblur-ops` - Blur pipeline
//!
//! [`fastblur-core`]: fastblur_core

#![warn(missing_docs)]

pub mod gamma;
mod convert;

pub use gamma::{gamma_eotf, gamma_oetf, Gamma, GammaLut, GammaMode, GAMMA};
