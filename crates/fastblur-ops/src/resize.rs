//! Fill-to-size resizing.
//!
//! Resizing to a [`Geometry`] keeps the aspect ratio of the target: the
//! largest crop of the source with that ratio is selected, slid along the
//! excess axis by the anchor, and then resampled with nearest-neighbour.
//!
//! ```text
//!   source 100x50, target 40x40 @ 0.5
//!
//!   +-------------------------------+
//!   |        |  crop 50x50  |       |
//!   |  25 px |   x = 25     | 25 px |
//!   |        |              |       |
//!   +-------------------------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use fastblur_core::{PixelBuffer, Rect};
//! use fastblur_ops::resize::{fill_crop, fill_resize, Geometry};
//!
//! let geometry: Geometry = "40x40".parse().unwrap();
//! assert_eq!(fill_crop(100, 50, &geometry), Rect::new(25, 0, 50, 50));
//!
//! let out = fill_resize(&PixelBuffer::new(100, 50), &geometry).unwrap();
//! assert_eq!(out.dimensions(), (40, 40));
//! ```

use crate::{OpsError, OpsResult};
use fastblur_core::{PixelBuffer, PixelView, Rect, CHANNELS};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Target size and crop anchor for a fill resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    width: usize,
    height: usize,
    anchor: f32,
}

impl Geometry {
    /// Anchor used when none is given (centred crop).
    pub const DEFAULT_ANCHOR: f32 = 0.5;

    /// Creates a centred geometry.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if either size is zero or the image
    /// would hold more samples than fit in `usize`.
    pub fn new(width: usize, height: usize) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "target size {width}x{height} must be non-zero"
            )));
        }
        if width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .is_none()
        {
            return Err(OpsError::InvalidParameter(format!(
                "target size {width}x{height} is too large"
            )));
        }
        Ok(Self {
            width,
            height,
            anchor: Self::DEFAULT_ANCHOR,
        })
    }

    /// Sets where the crop sits along the cropped axis: 0 is the top/left
    /// edge, 1 the bottom/right edge.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] unless `0 <= anchor <= 1`.
    pub fn with_anchor(mut self, anchor: f32) -> OpsResult<Self> {
        if !(0.0..=1.0).contains(&anchor) {
            return Err(OpsError::InvalidParameter(format!(
                "anchor {anchor} must be within [0, 1]"
            )));
        }
        self.anchor = anchor;
        Ok(self)
    }

    /// Target width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Target height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Crop anchor in [0, 1].
    #[inline]
    pub fn anchor(&self) -> f32 {
        self.anchor
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.anchor)
    }
}

impl FromStr for Geometry {
    type Err = OpsError;

    /// Parses `WIDTHxHEIGHT[@ANCHOR]`.
    ///
    /// ```rust
    /// use fastblur_ops::resize::Geometry;
    ///
    /// let g: Geometry = "1280x720@0.25".parse().unwrap();
    /// assert_eq!((g.width(), g.height(), g.anchor()), (1280, 720, 0.25));
    /// assert!("1280x".parse::<Geometry>().is_err());
    /// ```
    fn from_str(s: &str) -> OpsResult<Self> {
        let bad = || {
            OpsError::InvalidParameter(format!(
                "geometry '{s}': expected WIDTHxHEIGHT[@ANCHOR]"
            ))
        };

        let (size, anchor) = match s.split_once('@') {
            Some((size, anchor)) => (size, Some(anchor)),
            None => (s, None),
        };
        let (w, h) = size.split_once(['x', 'X']).ok_or_else(bad)?;
        let width = w.trim().parse::<usize>().map_err(|_| bad())?;
        let height = h.trim().parse::<usize>().map_err(|_| bad())?;

        let geometry = Self::new(width, height)?;
        match anchor {
            Some(a) => geometry.with_anchor(a.trim().parse::<f32>().map_err(|_| bad())?),
            None => Ok(geometry),
        }
    }
}

/// Largest crop of an `image_w`x`image_h` image with the target's aspect.
///
/// The returned rect always lies inside the image and is at least 1x1 for
/// a non-empty image.
pub fn fill_crop(image_w: usize, image_h: usize, geometry: &Geometry) -> Rect {
    let (tw, th) = (geometry.width, geometry.height);
    let anchor = geometry.anchor as f64;

    // Compare aspects exactly: tw/th > iw/ih.
    let target_wider = tw as u128 * image_h as u128 > image_w as u128 * th as u128;
    let rect = if target_wider {
        let crop_h = clamp_extent(round_ratio(image_w, th, tw), image_h);
        let crop_y = (anchor * (image_h - crop_h) as f64).round() as usize;
        Rect::new(0, crop_y, image_w, crop_h)
    } else {
        let crop_w = clamp_extent(round_ratio(image_h, tw, th), image_w);
        let crop_x = (anchor * (image_w - crop_w) as f64).round() as usize;
        Rect::new(crop_x, 0, crop_w, image_h)
    };
    trace!(image_w, image_h, target = %geometry, ?rect, "fill_crop");
    rect
}

/// `round(a * b / c)`.
fn round_ratio(a: usize, b: usize, c: usize) -> usize {
    (a as f64 * b as f64 / c as f64).round() as usize
}

/// Limits a crop extent to `[1, dim]` (0 for an empty image).
#[inline]
fn clamp_extent(extent: usize, dim: usize) -> usize {
    extent.max(1).min(dim)
}

/// Nearest-neighbour resample of `src` to `width`x`height`.
///
/// Target pixel `(x, y)` copies source pixel
/// `(floor(x * sw / width + 0.5), floor(y * sh / height + 0.5))`, clamped to
/// the last source column and row.
///
/// # Example
///
/// ```rust
/// use fastblur_core::PixelBuffer;
/// use fastblur_ops::resize::resample_nearest;
///
/// let mut src = PixelBuffer::new(2, 1);
/// src.set_pixel(1, 0, [1.0, 1.0, 1.0]);
/// let up = resample_nearest(&src.view(), 4, 1);
/// let reds: Vec<f32> = (0..4).map(|x| up.pixel(x, 0)[0]).collect();
/// assert_eq!(reds, [0.0, 1.0, 1.0, 1.0]);
/// ```
pub fn resample_nearest(src: &PixelView<'_>, width: usize, height: usize) -> PixelBuffer {
    let (sw, sh) = src.dimensions();
    trace!(sw, sh, width, height, "resample_nearest");
    let mut dst = PixelBuffer::new(width, height);
    if sw == 0 || sh == 0 || width == 0 || height == 0 {
        return dst;
    }

    let columns: Vec<usize> = (0..width)
        .map(|x| nearest_index(x, sw, width) * CHANNELS)
        .collect();
    for (y, row) in dst.rows_mut().enumerate() {
        let src_row = src.row(nearest_index(y, sh, height));
        for (px, &sx) in row.chunks_exact_mut(CHANNELS).zip(&columns) {
            px.copy_from_slice(&src_row[sx..sx + CHANNELS]);
        }
    }
    dst
}

#[inline]
fn nearest_index(i: usize, src_len: usize, dst_len: usize) -> usize {
    let s = (i as f64 * src_len as f64 / dst_len as f64 + 0.5).floor() as usize;
    s.min(src_len - 1)
}

/// Crops `src` to the target aspect and resamples it to the target size.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if `src` is empty.
pub fn fill_resize(src: &PixelBuffer, geometry: &Geometry) -> OpsResult<PixelBuffer> {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot resize an empty {width}x{height} image"
        )));
    }
    let rect = fill_crop(width, height, geometry);
    let view = src.crop(rect)?;
    Ok(resample_nearest(&view, geometry.width, geometry.height))
}
