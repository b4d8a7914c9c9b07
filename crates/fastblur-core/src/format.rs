//! Interleaved 8-bit pixel layouts.
//!
//! A [`PixelLayout`] is the byte offset table used to pull R, G and B out of
//! an interleaved byte stream. Alpha, when present, only contributes to the
//! pixel size; it is never read.
//!
//! ```text
//! RGBA: [R G B A] [R G B A] ...   r=0 g=1 b=2 size=4
//! ARGB: [A R G B] [A R G B] ...   r=1 g=2 b=3 size=4
//! BGR:  [B G R]   [B G R]   ...   r=2 g=1 b=0 size=3
//! ```

/// Byte offsets of the color channels within one interleaved pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLayout {
    /// Bytes per pixel (3 or 4).
    pub bytes_per_pixel: usize,
    /// Byte offset of red within a pixel.
    pub r: usize,
    /// Byte offset of green within a pixel.
    pub g: usize,
    /// Byte offset of blue within a pixel.
    pub b: usize,
}

impl PixelLayout {
    /// Packed `R G B`.
    pub const RGB: Self = Self::new_unchecked(3, 0, 1, 2);
    /// Packed `R G B A`.
    pub const RGBA: Self = Self::new_unchecked(4, 0, 1, 2);
    /// Packed `A R G B`.
    pub const ARGB: Self = Self::new_unchecked(4, 1, 2, 3);
    /// Packed `B G R`.
    pub const BGR: Self = Self::new_unchecked(3, 2, 1, 0);
    /// Packed `B G R A`.
    pub const BGRA: Self = Self::new_unchecked(4, 2, 1, 0);
    /// Packed `A B G R`.
    pub const ABGR: Self = Self::new_unchecked(4, 3, 2, 1);

    const fn new_unchecked(bytes_per_pixel: usize, r: usize, g: usize, b: usize) -> Self {
        Self {
            bytes_per_pixel,
            r,
            g,
            b,
        }
    }

    /// Returns `true` if the layout carries a fourth (alpha) byte.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.bytes_per_pixel > 3
    }

    /// Offsets as an `[r, g, b]` array.
    #[inline]
    pub const fn offsets(&self) -> [usize; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::RGB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(PixelLayout::ARGB.offsets(), [1, 2, 3]);
        assert_eq!(PixelLayout::ABGR.offsets(), [3, 2, 1]);
        assert_eq!(PixelLayout::BGR.offsets(), [2, 1, 0]);
        assert!(PixelLayout::RGBA.has_alpha());
        assert!(!PixelLayout::RGB.has_alpha());
    }
}
