//! End-to-end processing of an 8-bit image.
//!
//! ```text
//! ImageData (8-bit, any layout)
//!     -> gamma decode      (linear RGB f32)
//!     -> fill resize       (optional)
//!     -> recursive blur    (skipped by resize_only)
//!     -> gamma encode
//! ImageData (packed RGB8)
//! ```
//!
//! The [`Gamma`] transfer is built once per call and used for both ends, so
//! decode and encode always agree on the curve.
//!
//! # Example
//!
//! ```rust
//! use fastblur_io::{ImageData, PixelLayout};
//! use fastblur_ops::filter::BlurParams;
//! use fastblur_ops::pipeline::Pipeline;
//! use fastblur_transfer::GammaMode;
//!
//! let input = ImageData::from_packed(2, 2, PixelLayout::RGB, vec![128; 12]).unwrap();
//! let output = Pipeline::new()
//!     .with_params(BlurParams::new(3, 1).unwrap())
//!     .with_gamma(GammaMode::Fast)
//!     .run(&input)
//!     .unwrap();
//! assert_eq!(output.data, vec![128; 12]);
//! ```

use crate::filter::{blur, BlurParams};
use crate::resize::{fill_resize, Geometry};
use crate::OpsResult;
use fastblur_core::PixelLayout;
use fastblur_io::ImageData;
use fastblur_transfer::{Gamma, GammaMode};
use std::time::Instant;
use tracing::debug;

/// Blur settings for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    params: BlurParams,
    gamma: GammaMode,
    fill: Option<Geometry>,
}

impl Pipeline {
    /// Default settings: kernel 31, 4 passes, exact gamma, no resize.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets kernel and pass count.
    pub fn with_params(mut self, params: BlurParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the gamma mode.
    pub fn with_gamma(mut self, gamma: GammaMode) -> Self {
        self.gamma = gamma;
        self
    }

    /// Resizes to `geometry` before blurring, or not at all for `None`.
    pub fn with_fill(mut self, fill: Option<Geometry>) -> Self {
        self.fill = fill;
        self
    }

    /// Blur parameters.
    pub fn params(&self) -> &BlurParams {
        &self.params
    }

    /// Gamma mode.
    pub fn gamma(&self) -> GammaMode {
        self.gamma
    }

    /// Resize target, if any.
    pub fn fill(&self) -> Option<&Geometry> {
        self.fill.as_ref()
    }

    /// Decodes, optionally resizes, blurs and re-encodes `image`.
    ///
    /// # Errors
    ///
    /// Fails if `image` is empty or its stride and data disagree.
    pub fn run(&self, image: &ImageData) -> OpsResult<ImageData> {
        self.process(image, true)
    }

    /// Same as [`run`](Self::run) without the blur.
    pub fn resize_only(&self, image: &ImageData) -> OpsResult<ImageData> {
        self.process(image, false)
    }

    fn process(&self, image: &ImageData, apply_blur: bool) -> OpsResult<ImageData> {
        let gamma = Gamma::new(self.gamma);

        let start = Instant::now();
        let mut linear = gamma.decode_image(
            &image.data,
            image.width,
            image.height,
            image.stride,
            image.layout,
        )?;
        debug!(
            width = image.width,
            height = image.height,
            gamma = %self.gamma,
            elapsed = ?start.elapsed(),
            "Decoded"
        );

        if let Some(geometry) = &self.fill {
            let start = Instant::now();
            linear = fill_resize(&linear, geometry)?;
            debug!(target = %geometry, elapsed = ?start.elapsed(), "Resized");
        }

        if apply_blur {
            let start = Instant::now();
            linear = blur(linear, &self.params);
            debug!(
                kernel = self.params.kernel().size(),
                passes = self.params.passes(),
                elapsed = ?start.elapsed(),
                "Blurred"
            );
        }

        let start = Instant::now();
        let (width, height) = linear.dimensions();
        let bytes = gamma.encode_image(&linear.view());
        debug!(width, height, elapsed = ?start.elapsed(), "Encoded");

        Ok(ImageData::from_packed(width, height, PixelLayout::RGB, bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let geometry: Geometry = "8x8".parse().unwrap();
        let pipeline = Pipeline::new()
            .with_gamma(GammaMode::Fast)
            .with_fill(Some(geometry));
        assert_eq!(pipeline.gamma(), GammaMode::Fast);
        assert_eq!(pipeline.fill(), Some(&geometry));
        assert_eq!(pipeline.params(), &BlurParams::default());
    }

    #[test]
    fn test_output_is_packed_rgb() {
        let input = ImageData::from_raw_parts(
            2,
            1,
            12,
            PixelLayout::BGRA,
            vec![0, 0, 255, 9, 255, 0, 0, 9, 0xEE, 0xEE, 0xEE, 0xEE],
        )
        .unwrap();
        let output = Pipeline::new().resize_only(&input).unwrap();
        assert_eq!(output.layout, PixelLayout::RGB);
        assert_eq!(output.stride, 6);
        assert_eq!(output.data, vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let input = ImageData {
            width: 0,
            height: 0,
            stride: 0,
            layout: PixelLayout::RGB,
            data: Vec::new(),
        };
        assert!(Pipeline::new().run(&input).is_err());
    }
}
