//! Headerless interleaved 8-bit streams.
//!
//! A raw stream has no header, so its geometry comes from a [`RawFormat`]
//! descriptor written as `LAYOUT:WIDTHxHEIGHT`:
//!
//! ```text
//! rgb:640x480      3 bytes per pixel
//! bgra:1920x1080   4 bytes per pixel, alpha last
//! ARGB:32x32       4 bytes per pixel, alpha first (case-insensitive)
//! ```
//!
//! Rows are packed. Bytes past `width * height * bytes_per_pixel` are
//! ignored; a shorter stream is [`IoError::Truncated`].

use crate::{ImageData, IoError, IoResult};
use fastblur_core::PixelLayout;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::trace;

/// Channel order of a raw stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawLayout {
    /// `R G B`
    Rgb,
    /// `R G B A`
    Rgba,
    /// `A R G B`
    Argb,
    /// `B G R`
    Bgr,
    /// `B G R A`
    Bgra,
    /// `A B G R`
    Abgr,
}

impl RawLayout {
    /// Byte offsets for this order.
    pub fn pixel_layout(&self) -> PixelLayout {
        match self {
            Self::Rgb => PixelLayout::RGB,
            Self::Rgba => PixelLayout::RGBA,
            Self::Argb => PixelLayout::ARGB,
            Self::Bgr => PixelLayout::BGR,
            Self::Bgra => PixelLayout::BGRA,
            Self::Abgr => PixelLayout::ABGR,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Argb => "argb",
            Self::Bgr => "bgr",
            Self::Bgra => "bgra",
            Self::Abgr => "abgr",
        }
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.pixel_layout().bytes_per_pixel
    }
}

impl fmt::Display for RawLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RawLayout {
    type Err = IoError;

    /// Parses a channel order.
    ///
    /// A 4-character order needs its single `a` at one end; the other three
    /// characters must be `rgb` or `bgr`.
    fn from_str(s: &str) -> IoResult<Self> {
        let lower = s.to_ascii_lowercase();
        let bad = |why: &str| IoError::Parse(format!("raw layout '{s}': {why}"));

        let (color, alpha) = match lower.len() {
            3 => (lower.as_str(), None),
            4 => match (lower.starts_with('a'), lower.ends_with('a')) {
                (true, true) => return Err(bad("alpha at both ends is ambiguous")),
                (true, false) => (&lower[1..], Some(AlphaPosition::First)),
                (false, true) => (&lower[..3], Some(AlphaPosition::Last)),
                (false, false) => return Err(bad("4-byte layouts need a leading or trailing 'a'")),
            },
            _ => return Err(bad("expected 3 or 4 channels")),
        };

        let layout = match (color, alpha) {
            ("rgb", None) => Self::Rgb,
            ("rgb", Some(AlphaPosition::Last)) => Self::Rgba,
            ("rgb", Some(AlphaPosition::First)) => Self::Argb,
            ("bgr", None) => Self::Bgr,
            ("bgr", Some(AlphaPosition::Last)) => Self::Bgra,
            ("bgr", Some(AlphaPosition::First)) => Self::Abgr,
            _ => return Err(bad("color channels must be 'rgb' or 'bgr'")),
        };
        Ok(layout)
    }
}

#[derive(Clone, Copy)]
enum AlphaPosition {
    First,
    Last,
}

/// Geometry and channel order of a raw stream.
///
/// # Example
///
/// ```rust
/// use fastblur_io::{RawFormat, RawLayout};
///
/// let format: RawFormat = "BGRA:1920x1080".parse().unwrap();
/// assert_eq!(format.layout, RawLayout::Bgra);
/// assert_eq!(format.frame_size(), 1920 * 1080 * 4);
/// assert_eq!(format.to_string(), "bgra:1920x1080");
///
/// assert!("aRGBa:4x4".parse::<RawFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawFormat {
    /// Channel order.
    pub layout: RawLayout,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl RawFormat {
    /// Creates a descriptor, rejecting zero sizes.
    pub fn new(layout: RawLayout, width: usize, height: usize) -> IoResult<Self> {
        if width == 0 || height == 0 {
            return Err(IoError::Parse(format!(
                "raw size {width}x{height} must be non-zero"
            )));
        }
        Ok(Self {
            layout,
            width,
            height,
        })
    }

    /// Bytes in one frame.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.width * self.height * self.layout.bytes_per_pixel()
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}x{}", self.layout, self.width, self.height)
    }
}

impl FromStr for RawFormat {
    type Err = IoError;

    fn from_str(s: &str) -> IoResult<Self> {
        let bad = || IoError::Parse(format!("raw format '{s}': expected LAYOUT:WIDTHxHEIGHT"));

        let (layout, size) = s.split_once(':').ok_or_else(bad)?;
        let (w, h) = size
            .split_once(['x', 'X'])
            .ok_or_else(bad)?;
        let width = w.trim().parse::<usize>().map_err(|_| bad())?;
        let height = h.trim().parse::<usize>().map_err(|_| bad())?;

        // Reject sizes whose frame would overflow before any allocation.
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| IoError::Parse(format!("raw size {width}x{height} is too large")))?;

        Self::new(layout.trim().parse()?, width, height)
    }
}

/// Wraps a raw byte stream as an image.
///
/// # Errors
///
/// [`IoError::Truncated`] if `bytes` holds less than one frame.
///
/// # Example
///
/// ```rust
/// use fastblur_io::{decode_raw, IoError, PixelLayout, RawFormat};
///
/// let format: RawFormat = "bgr:2x1".parse().unwrap();
/// let img = decode_raw(&[1, 2, 3, 4, 5, 6, 99], &format).unwrap();
/// assert_eq!(img.layout, PixelLayout::BGR);
/// assert_eq!(img.data, vec![1, 2, 3, 4, 5, 6]);
///
/// let err = decode_raw(&[1, 2, 3], &format).unwrap_err();
/// assert!(matches!(err, IoError::Truncated { expected: 6, actual: 3 }));
/// ```
pub fn decode_raw(bytes: &[u8], format: &RawFormat) -> IoResult<ImageData> {
    let expected = format.frame_size();
    trace!(width = format.width, height = format.height, layout = %format.layout, "decode_raw");
    if bytes.len() < expected {
        return Err(IoError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    ImageData::from_packed(
        format.width,
        format.height,
        format.layout.pixel_layout(),
        bytes[..expected].to_vec(),
    )
}

/// Reads a raw byte stream from a file.
pub fn read_raw<P: AsRef<Path>>(path: P, format: &RawFormat) -> IoResult<ImageData> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_raw(&bytes, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_parse() {
        let cases = [
            ("rgb", RawLayout::Rgb),
            ("RGBA", RawLayout::Rgba),
            ("argb", RawLayout::Argb),
            ("Bgr", RawLayout::Bgr),
            ("bgra", RawLayout::Bgra),
            ("abgr", RawLayout::Abgr),
        ];
        for (s, expected) in cases {
            assert_eq!(s.parse::<RawLayout>().unwrap(), expected, "{s}");
        }
    }

    #[test]
    fn test_layout_rejects() {
        for s in ["", "rg", "rgbx", "abga", "argba", "grb", "xrgb", "rgba8", "aaaa"] {
            assert!(s.parse::<RawLayout>().is_err(), "{s}");
        }
    }

    #[test]
    fn test_format_parse() {
        let format: RawFormat = "argb:640x480".parse().unwrap();
        assert_eq!(format.layout, RawLayout::Argb);
        assert_eq!((format.width, format.height), (640, 480));
        assert_eq!(format.layout.pixel_layout(), PixelLayout::ARGB);
    }

    #[test]
    fn test_format_rejects() {
        for s in ["rgb", "rgb:640", "rgb:0x10", "rgb:10x", "rgb:-1x2", "cmyk:2x2", ":2x2"] {
            assert!(matches!(s.parse::<RawFormat>(), Err(IoError::Parse(_))), "{s}");
        }
        let huge = format!("rgb:{}x{}", usize::MAX, 2);
        assert!(huge.parse::<RawFormat>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let format = RawFormat::new(RawLayout::Abgr, 3, 7).unwrap();
        assert_eq!(format.to_string().parse::<RawFormat>().unwrap(), format);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let format: RawFormat = "rgba:1x1".parse().unwrap();
        let img = decode_raw(&[1, 2, 3, 4, 5, 6], &format).unwrap();
        assert_eq!(img.data, vec![1, 2, 3, 4]);
        assert!(img.is_packed());
    }
}
