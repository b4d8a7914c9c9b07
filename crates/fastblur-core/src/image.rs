//! Linear-light pixel buffers.
//!
//! This module provides the two containers every fastblur stage works on:
//! - [`PixelBuffer`] - Owned, growable RGB `f32` buffer
//! - [`PixelView`] - Borrowed, strided window into a buffer (e.g. a crop)
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, three interleaved
//! channels per pixel. Rows are `stride` samples apart:
//!
//! ```text
//! Memory: [R G B R G B R G B ... pad]  ← Row 0
//!         [R G B R G B R G B ... pad]  ← Row 1
//!         ...
//! ```
//!
//! Owned buffers are always packed (`stride == 3 * width`). Views keep the
//! stride of their source, so a crop never copies.
//!
//! # Usage
//!
//! ```rust
//! use fastblur_core::{PixelBuffer, Rect};
//!
//! let mut img = PixelBuffer::filled(100, 50, [0.5, 0.25, 0.125]);
//! img.set_pixel(30, 10, [1.0, 0.0, 0.0]);
//!
//! let view = img.crop(Rect::new(25, 0, 50, 50)).unwrap();
//! assert_eq!(view.pixel(5, 10), [1.0, 0.0, 0.0]);
//! assert_eq!(view.stride(), img.stride());
//! ```

use crate::{Error, Rect, Result};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// One linear-light RGB pixel.
pub type Rgb = [f32; CHANNELS];

/// Edge length of the square tiles [`transpose`] copies at a time.
const TRANSPOSE_TILE: usize = 32;

/// Owned linear-light RGB image.
///
/// The allocation only ever grows: [`ensure_size`](Self::ensure_size) reuses
/// the existing storage whenever the new image fits, which lets the blur
/// passes ping-pong between two buffers without reallocating.
///
/// # Example
///
/// ```rust
/// use fastblur_core::PixelBuffer;
///
/// let mut img = PixelBuffer::new(64, 32);
/// let cap = img.capacity();
/// img.ensure_size(32, 64);
/// assert_eq!(img.capacity(), cap);
/// assert_eq!(img.dimensions(), (32, 64));
/// ```
#[derive(Clone, Default)]
pub struct PixelBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
    stride: usize,
}

impl PixelBuffer {
    /// Creates a zero-sized buffer with no allocation.
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            stride: 0,
        }
    }

    /// Creates a new buffer filled with zeros.
    pub fn new(width: usize, height: usize) -> Self {
        let mut buf = Self::empty();
        buf.ensure_size(width, height);
        buf
    }

    /// Creates a buffer filled with a single pixel value.
    pub fn filled(width: usize, height: usize, pixel: Rgb) -> Self {
        let mut buf = Self::new(width, height);
        buf.fill(pixel);
        buf
    }

    /// Creates a buffer from packed RGB samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data` doesn't hold exactly
    /// `3 * width * height` samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_data(2, 1, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
    /// assert_eq!(img.pixel(1, 0), [0.3, 0.4, 0.5]);
    /// assert!(PixelBuffer::from_data(2, 2, vec![0.0; 6]).is_err());
    /// ```
    pub fn from_data(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let expected = packed_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            stride: width * CHANNELS,
        })
    }

    /// Resizes the buffer to `width`x`height`, growing storage only if needed.
    ///
    /// Sets `stride = 3 * width`. Shrinking never reallocates. Sample values
    /// are unspecified afterwards whenever the stride changed.
    ///
    /// # Panics
    ///
    /// Panics if `3 * width * height` overflows `usize`, like
    /// [`Vec::with_capacity`] on an impossible size.
    pub fn ensure_size(&mut self, width: usize, height: usize) {
        let needed = match packed_len(width, height) {
            Ok(needed) => needed,
            Err(err) => panic!("{err}"),
        };
        if needed > self.data.len() {
            self.data.resize(needed, 0.0);
        }
        self.width = width;
        self.height = height;
        self.stride = width * CHANNELS;
    }

    /// Number of samples the current allocation can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the stride (samples per row).
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the live samples, `stride * height` long.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.stride * self.height]
    }

    /// Returns the live samples mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        let len = self.stride * self.height;
        &mut self.data[..len]
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.view().pixel(x, y)
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Rgb) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = y * self.stride + x * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: Rgb) {
        for chunk in self.as_mut_slice().chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Returns a row of samples (`3 * width` long).
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    /// Iterates over mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, f32> {
        let stride = self.stride.max(1);
        self.as_mut_slice().chunks_mut(stride)
    }

    /// Borrows the whole buffer as a view.
    #[inline]
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: self.as_slice(),
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Borrows a region of this buffer without copying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `region` is empty or doesn't fit.
    pub fn crop(&self, region: impl Into<Rect>) -> Result<PixelView<'_>> {
        self.view().crop(region)
    }

    /// Consumes the buffer, returning its live packed samples.
    pub fn into_vec(mut self) -> Vec<f32> {
        self.data.truncate(self.stride * self.height);
        self.data
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("capacity", &self.data.len())
            .finish()
    }
}

/// Borrowed, strided window into pixel data.
///
/// A view never owns or frees its samples; the borrow keeps the source alive
/// and frozen for as long as the view exists.
///
/// # Example
///
/// ```rust
/// use fastblur_core::{PixelBuffer, Rect};
///
/// let img = PixelBuffer::new(16, 16);
/// let view = img.crop(Rect::new(4, 4, 8, 8)).unwrap();
/// let inner = view.crop(Rect::new(2, 2, 4, 4)).unwrap();
/// assert_eq!(inner.dimensions(), (4, 4));
/// assert_eq!(inner.stride(), 48);
/// ```
#[derive(Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [f32],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelView<'a> {
    /// Creates a view over `data` whose first sample is pixel (0, 0).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < 3 * width`
    /// - [`Error::InvalidDimensions`] if `data` is too short
    pub fn new(data: &'a [f32], width: usize, height: usize, stride: usize) -> Result<Self> {
        let min_stride = width * CHANNELS;
        if stride < min_stride {
            return Err(Error::InvalidStride {
                stride,
                min_stride,
                width,
            });
        }
        let needed = strided_len(width, height, stride);
        if data.len() < needed {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("stride {} needs {} samples, got {}", stride, needed, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the view width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the view height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the view dimensions.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the stride (samples per row) shared with the source.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `true` if rows follow each other without padding.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.width * CHANNELS
    }

    /// Returns row `y` (`3 * width` samples).
    #[inline]
    pub fn row(&self, y: usize) -> &'a [f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [f32]> + use<'a> {
        let view = *self;
        (0..view.height).map(move |y| view.row(y))
    }

    /// Returns the pixel at (x, y) relative to the view origin.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are outside the view bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = y * self.stride + x * CHANNELS;
        let mut px = [0.0; CHANNELS];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        px
    }

    /// Narrows the view to `region`, keeping the stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `region` is empty or doesn't fit.
    pub fn crop(&self, region: impl Into<Rect>) -> Result<PixelView<'a>> {
        let rect = region.into();
        if rect.is_empty() || !rect.fits_within(self.width, self.height) {
            return Err(Error::invalid_region(rect, self.width, self.height));
        }
        let start = rect.y * self.stride + rect.x * CHANNELS;
        let len = strided_len(rect.width, rect.height, self.stride);
        Ok(PixelView {
            data: &self.data[start..start + len],
            width: rect.width,
            height: rect.height,
            stride: self.stride,
        })
    }

    /// Copies the view into a new packed buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.width, self.height);
        for (dst, src) in out.rows_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }

    /// Returns a transposed copy of the view.
    pub fn transposed(&self) -> PixelBuffer {
        let mut out = PixelBuffer::empty();
        transpose(self, &mut out);
        out
    }
}

impl std::fmt::Debug for PixelView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<'a> From<&'a PixelBuffer> for PixelView<'a> {
    fn from(buf: &'a PixelBuffer) -> Self {
        buf.view()
    }
}

/// Writes the transpose of `src` into `dst`.
///
/// `dst` is resized to `height`x`width` and receives `dst(x, y) = src(y, x)`
/// for every pixel, three channels at a time. The copy walks square tiles so
/// both the reads and the scattered writes stay within a few cache lines.
///
/// # Example
///
/// ```rust
/// use fastblur_core::{transpose, PixelBuffer};
///
/// let mut src = PixelBuffer::new(3, 2);
/// src.set_pixel(2, 1, [1.0, 2.0, 3.0]);
///
/// let mut dst = PixelBuffer::empty();
/// transpose(&src.view(), &mut dst);
/// assert_eq!(dst.dimensions(), (2, 3));
/// assert_eq!(dst.pixel(1, 2), [1.0, 2.0, 3.0]);
/// ```
pub fn transpose(src: &PixelView<'_>, dst: &mut PixelBuffer) {
    let (w, h) = src.dimensions();
    dst.ensure_size(h, w);
    let dst_stride = dst.stride();
    let out = dst.as_mut_slice();

    for ty in (0..h).step_by(TRANSPOSE_TILE) {
        let y_end = (ty + TRANSPOSE_TILE).min(h);
        for tx in (0..w).step_by(TRANSPOSE_TILE) {
            let x_end = (tx + TRANSPOSE_TILE).min(w);
            for y in ty..y_end {
                let row = src.row(y);
                for x in tx..x_end {
                    let s = x * CHANNELS;
                    let d = x * dst_stride + y * CHANNELS;
                    out[d..d + CHANNELS].copy_from_slice(&row[s..s + CHANNELS]);
                }
            }
        }
    }
}

/// Samples needed for a packed `width`x`height` image, overflow-checked.
fn packed_len(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflows usize"))
}

/// Samples spanned by a strided image: full rows except the last.
#[inline]
fn strided_len(width: usize, height: usize, stride: usize) -> usize {
    if height == 0 {
        0
    } else {
        (height - 1) * stride + width * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = (y * width + x) as f32;
                img.set_pixel(x, y, [v, v + 0.25, v + 0.5]);
            }
        }
        img
    }

    #[test]
    fn test_new() {
        let img = PixelBuffer::new(10, 5);
        assert_eq!(img.dimensions(), (10, 5));
        assert_eq!(img.stride(), 30);
        assert_eq!(img.as_slice().len(), 150);
        assert!(img.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty() {
        let mut img = PixelBuffer::empty();
        assert!(img.is_empty());
        assert_eq!(img.capacity(), 0);
        assert_eq!(img.rows_mut().count(), 0);
    }

    #[test]
    fn test_ensure_size_grows() {
        let mut img = PixelBuffer::new(4, 4);
        img.ensure_size(8, 8);
        assert_eq!(img.capacity(), 8 * 8 * 3);
        assert_eq!(img.stride(), 24);
    }

    #[test]
    fn test_ensure_size_never_shrinks() {
        let mut img = PixelBuffer::new(8, 8);
        img.ensure_size(2, 3);
        assert_eq!(img.capacity(), 8 * 8 * 3);
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.as_slice().len(), 18);
        assert_eq!(img.into_vec().len(), 18);
    }

    #[test]
    #[should_panic(expected = "size overflows usize")]
    fn test_ensure_size_overflow_panics() {
        let mut img = PixelBuffer::empty();
        img.ensure_size(1 << 32, 1 << 32);
    }

    #[test]
    fn test_fill_and_pixel() {
        let img = PixelBuffer::filled(4, 3, [0.1, 0.2, 0.3]);
        assert_eq!(img.pixel(0, 0), [0.1, 0.2, 0.3]);
        assert_eq!(img.pixel(3, 2), [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_row() {
        let img = gradient(4, 3);
        let row = img.row(1);
        assert_eq!(row.len(), 12);
        assert_eq!(row[0], 4.0);
    }

    #[test]
    fn test_crop_shares_stride() {
        let img = gradient(10, 6);
        let view = img.crop(Rect::new(3, 2, 4, 3)).unwrap();
        assert_eq!(view.dimensions(), (4, 3));
        assert_eq!(view.stride(), 30);
        assert!(!view.is_packed());
        assert_eq!(view.pixel(0, 0), img.pixel(3, 2));
        assert_eq!(view.pixel(3, 2), img.pixel(6, 4));
        assert_eq!(view.row(1)[0], img.pixel(3, 3)[0]);
    }

    #[test]
    fn test_crop_full_image() {
        let img = gradient(5, 5);
        let view = img.crop(Rect::from_size(5, 5)).unwrap();
        assert!(view.is_packed());
        assert_eq!(view.pixel(4, 4), img.pixel(4, 4));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let img = PixelBuffer::new(10, 10);
        assert!(img.crop(Rect::new(5, 5, 6, 1)).is_err());
        assert!(img.crop(Rect::new(0, 9, 1, 2)).is_err());
        assert!(img.crop(Rect::new(0, 0, 0, 1)).is_err());
    }

    #[test]
    fn test_crop_of_crop() {
        let img = gradient(12, 12);
        let outer = img.crop(Rect::new(2, 3, 8, 8)).unwrap();
        let inner = outer.crop(Rect::new(1, 1, 3, 3)).unwrap();
        assert_eq!(inner.pixel(0, 0), img.pixel(3, 4));
        assert!(outer.crop(Rect::new(6, 6, 3, 3)).is_err());
    }

    #[test]
    fn test_view_to_buffer() {
        let img = gradient(6, 4);
        let packed = img.crop(Rect::new(1, 1, 3, 2)).unwrap().to_buffer();
        assert_eq!(packed.dimensions(), (3, 2));
        assert_eq!(packed.stride(), 9);
        assert_eq!(packed.pixel(2, 1), img.pixel(3, 2));
    }

    #[test]
    fn test_view_new_validates() {
        let data = vec![0.0f32; 20];
        assert!(matches!(
            PixelView::new(&data, 4, 1, 6),
            Err(Error::InvalidStride { .. })
        ));
        assert!(PixelView::new(&data, 2, 3, 9).is_err());
        // Last row doesn't need trailing padding.
        assert!(PixelView::new(&data, 2, 3, 7).is_ok());
    }

    #[test]
    fn test_transpose_values() {
        let img = gradient(5, 3);
        let t = img.view().transposed();
        assert_eq!(t.dimensions(), (3, 5));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(t.pixel(y, x), img.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        // Larger than one tile in both directions, odd sizes.
        let img = gradient(71, 37);
        let back = img.view().transposed().view().transposed();
        assert_eq!(back.dimensions(), img.dimensions());
        assert_eq!(back.as_slice(), img.as_slice());
    }

    #[test]
    fn test_transpose_from_crop() {
        let img = gradient(9, 7);
        let view = img.crop(Rect::new(2, 1, 4, 5)).unwrap();
        let t = view.transposed();
        assert_eq!(t.dimensions(), (5, 4));
        assert_eq!(t.pixel(4, 3), view.pixel(3, 4));
    }

    #[test]
    fn test_transpose_reuses_destination() {
        let img = gradient(8, 2);
        let mut dst = PixelBuffer::new(16, 16);
        transpose(&img.view(), &mut dst);
        assert_eq!(dst.capacity(), 16 * 16 * 3);
        assert_eq!(dst.dimensions(), (2, 8));
        assert_eq!(dst.pixel(1, 7), img.pixel(7, 1));
    }
}
