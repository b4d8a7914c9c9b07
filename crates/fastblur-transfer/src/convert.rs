//! Whole-image conversion between 8-bit bitmaps and linear buffers.
//!
//! Decoding reads R, G and B through a [`PixelLayout`] offset table, so
//! any interleaved 3- or 4-byte layout feeds the same linear
//! [`PixelBuffer`]. Encoding always produces packed RGB8.

use crate::Gamma;
use fastblur_core::{Error, PixelBuffer, PixelLayout, PixelView, Result, CHANNELS};

impl Gamma {
    /// Linearizes an interleaved 8-bit bitmap.
    ///
    /// `stride` is the distance between rows in bytes and must be at least
    /// `width * layout.bytes_per_pixel`. Alpha bytes are skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero-sized image or a short `bytes`
    /// - [`Error::InvalidStride`] if rows would overlap
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_core::PixelLayout;
    /// use fastblur_transfer::{Gamma, GammaMode};
    ///
    /// let gamma = Gamma::new(GammaMode::Fast);
    /// // One BGRA pixel: blue 255, green 0, red 0, alpha 7
    /// let img = gamma.decode_image(&[255, 0, 0, 7], 1, 1, 4, PixelLayout::BGRA).unwrap();
    /// assert_eq!(img.pixel(0, 0), [0.0, 0.0, 1.0]);
    /// ```
    pub fn decode_image(
        &self,
        bytes: &[u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "image is empty"));
        }
        let bpp = layout.bytes_per_pixel;
        let row_bytes = width * bpp;
        if stride < row_bytes {
            return Err(Error::InvalidStride {
                stride,
                min_stride: row_bytes,
                width,
            });
        }
        let needed = (height - 1) * stride + row_bytes;
        if bytes.len() < needed {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected at least {} bytes, got {}", needed, bytes.len()),
            ));
        }

        let offsets = layout.offsets();
        let mut out = PixelBuffer::new(width, height);
        for (y, dst_row) in out.rows_mut().enumerate() {
            let src_row = &bytes[y * stride..y * stride + row_bytes];
            for (src_px, dst_px) in src_row
                .chunks_exact(bpp)
                .zip(dst_row.chunks_exact_mut(CHANNELS))
            {
                for (dst, &offset) in dst_px.iter_mut().zip(offsets.iter()) {
                    *dst = self.decode(src_px[offset]);
                }
            }
        }
        Ok(out)
    }

    /// Gamma-encodes a linear view into packed RGB8 (`3 * width` bytes per row).
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_core::PixelBuffer;
    /// use fastblur_transfer::Gamma;
    ///
    /// let img = PixelBuffer::filled(2, 2, [1.0, 0.0, 2.0]);
    /// let bytes = Gamma::default().encode_image(&img.view());
    /// assert_eq!(&bytes[..3], &[255, 0, 255]);
    /// assert_eq!(bytes.len(), 12);
    /// ```
    pub fn encode_image(&self, view: &PixelView<'_>) -> Vec<u8> {
        let mut out = Vec::with_capacity(view.width() * view.height() * CHANNELS);
        for row in view.rows() {
            out.extend(row.iter().map(|&l| self.encode(l)));
        }
        out
    }
}
