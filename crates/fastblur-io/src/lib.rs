//! # fastblur-io
//!
//! Image I/O for fastblur.
//!
//! Images are exchanged as [`ImageData`]: an interleaved 8-bit bitmap with
//! an explicit row stride and a [`PixelLayout`] telling where R, G and B
//! live inside each pixel. Two sources are supported:
//!
//! - **PNG** - decoded with the `png` crate, see [`png`]
//! - **Raw** - headerless interleaved bytes described by a [`RawFormat`]
//!
//! Output is always PNG.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fastblur_io::{read, read_raw, write, RawFormat};
//!
//! // PNG (auto-detected)
//! let image = read("input.png")?;
//!
//! // Raw BGRA frame dump
//! let format: RawFormat = "bgra:1920x1080".parse()?;
//! let frame = read_raw("frame.bin", &format)?;
//!
//! write("output.png", &image)?;
//! ```
//!
//! # Supported Inputs
//!
//! | Source | Bit Depths | Color Types |
//! |--------|------------|-------------|
//! | PNG | 1-16 (reduced to 8) | Gray, Gray+Alpha, RGB, RGBA, Palette |
//! | Raw | 8 | RGB, RGBA, ARGB, BGR, BGRA, ABGR |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod raw;

#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use fastblur_core::PixelLayout;
pub use raw::{decode_raw, read_raw, RawFormat, RawLayout};

use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, falling back to the extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for anything that is not a PNG.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        _ => Err(unsupported(path)),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// # Example
///
/// ```rust,ignore
/// use fastblur_io::write;
///
/// write("output.png", &image)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), image.width, image.height, "Writing image");

    match Format::from_extension(path) {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Interleaved 8-bit bitmap.
///
/// Row `y` starts at byte `y * stride`; only the first
/// `width * layout.bytes_per_pixel` bytes of a row are pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Distance between rows in bytes.
    pub stride: usize,
    /// Channel order within a pixel.
    pub layout: PixelLayout,
    /// Pixel bytes.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Wraps packed bytes (`stride == width * bytes_per_pixel`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_io::{ImageData, PixelLayout};
    ///
    /// let img = ImageData::from_packed(2, 1, PixelLayout::RGB, vec![0; 6]).unwrap();
    /// assert!(img.is_packed());
    /// assert!(ImageData::from_packed(2, 2, PixelLayout::RGB, vec![0; 6]).is_err());
    /// ```
    pub fn from_packed(
        width: usize,
        height: usize,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> IoResult<Self> {
        Self::from_raw_parts(width, height, width * layout.bytes_per_pixel, layout, data)
    }

    /// Wraps strided bytes, checking that every row fits in `data`.
    pub fn from_raw_parts(
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> IoResult<Self> {
        if width == 0 || height == 0 {
            return Err(IoError::DimensionMismatch {
                expected: "non-empty image".into(),
                actual: format!("{width}x{height}"),
            });
        }
        let row_bytes = width * layout.bytes_per_pixel;
        if stride < row_bytes {
            return Err(IoError::DimensionMismatch {
                expected: format!("stride >= {row_bytes}"),
                actual: format!("stride {stride}"),
            });
        }
        let needed = (height - 1) * stride + row_bytes;
        if data.len() < needed {
            return Err(IoError::DimensionMismatch {
                expected: format!("{needed} bytes"),
                actual: format!("{} bytes", data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            layout,
            data,
        })
    }

    /// Pixel bytes per row, without padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.layout.bytes_per_pixel
    }

    /// Returns `true` if rows carry no padding.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    /// Pixel bytes of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Pixel bytes with padding removed; borrows when already packed.
    pub fn packed(&self) -> Cow<'_, [u8]> {
        let len = self.row_bytes() * self.height;
        if self.is_packed() {
            return Cow::Borrowed(&self.data[..len]);
        }
        let mut out = Vec::with_capacity(len);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_strips_padding() {
        let data = vec![1, 2, 3, 0, 4, 5, 6, 0];
        let img = ImageData::from_raw_parts(1, 2, 4, PixelLayout::RGB, data).unwrap();
        assert!(!img.is_packed());
        assert_eq!(img.row(1), &[4, 5, 6]);
        assert_eq!(img.packed().as_ref(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_last_row_padding_optional() {
        let img = ImageData::from_raw_parts(1, 2, 4, PixelLayout::RGB, vec![0; 7]);
        assert!(img.is_ok());
        let img = ImageData::from_raw_parts(1, 2, 4, PixelLayout::RGB, vec![0; 6]);
        assert!(img.is_err());
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert!(ImageData::from_raw_parts(2, 1, 5, PixelLayout::RGB, vec![0; 6]).is_err());
        assert!(ImageData::from_packed(0, 1, PixelLayout::RGB, vec![]).is_err());
    }

    #[test]
    fn test_write_unknown_extension() {
        let img = ImageData::from_packed(1, 1, PixelLayout::RGB, vec![0; 3]).unwrap();
        let err = write("out.jpg", &img).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "jpg"));
    }
}
