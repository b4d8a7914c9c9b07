//! Rectangles for crop regions.
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Crop   │
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use fastblur_core::Rect;
//!
//! let rect = Rect::new(25, 0, 50, 50);
//! assert_eq!(rect.right(), 75);
//! assert!(Rect::from_size(100, 50).contains_rect(&rect));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is considered empty; buffers
/// refuse to crop to an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: usize,
    /// Y coordinate of the top edge (inclusive)
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Returns the area of the rectangle in pixels.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if this rectangle fully contains another.
    ///
    /// Edge sums are checked, so huge offsets never wrap around.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (Some(right), Some(bottom)) = (
            other.x.checked_add(other.width),
            other.y.checked_add(other.height),
        ) else {
            return false;
        };
        other.x >= self.x && other.y >= self.y && right <= self.right() && bottom <= self.bottom()
    }

    /// Returns `true` if this rectangle lies inside a `width`x`height` image.
    #[inline]
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        Rect::from_size(width, height).contains_rect(self)
    }
}

impl From<(usize, usize, usize, usize)> for Rect {
    fn from((x, y, width, height): (usize, usize, usize, usize)) -> Self {
        Self::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(25, 0, 50, 50).fits_within(100, 50));
        assert!(Rect::new(0, 0, 100, 50).fits_within(100, 50));
        assert!(!Rect::new(51, 0, 50, 50).fits_within(100, 50));
        assert!(!Rect::new(0, 1, 100, 50).fits_within(100, 50));
    }

    #[test]
    fn test_fits_within_overflow() {
        assert!(!Rect::new(usize::MAX, 0, 2, 1).fits_within(10, 10));
    }

    #[test]
    fn test_from_tuple() {
        let r: Rect = (1, 2, 3, 4).into();
        assert_eq!(r, Rect::new(1, 2, 3, 4));
    }
}
