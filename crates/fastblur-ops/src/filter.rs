//! Recursive box filtering.
//!
//! A box filter of odd size `n` replaces each sample by the mean of the `n`
//! samples centred on it, with edges clamped. Repeating it converges to a
//! Gaussian: `k` passes have variance `k * (n^2 - 1) / 12`.
//!
//! Each output sample is derived from its left neighbour by adding the
//! sample entering the window and subtracting the one leaving it, so a pass
//! costs O(1) per sample whatever `n` is:
//!
//! ```text
//! p = (n - 1) / 2, q = p + 1, a = 1 / n
//!
//! dst[0] = q*a*src[0] + a*(src[1] + ... + src[p])
//! dst[x] = dst[x-1] + a*src[min(x+p, W-1)] - a*src[max(x-q, 0)]
//! ```
//!
//! Only rows are ever filtered. [`blur`] handles the vertical direction by
//! transposing, filtering rows and transposing back.
//!
//! # Example
//!
//! ```rust
//! use fastblur_core::PixelBuffer;
//! use fastblur_ops::filter::{blur, BlurParams};
//!
//! let mut img = PixelBuffer::new(64, 64);
//! img.set_pixel(32, 32, [1.0, 1.0, 1.0]);
//!
//! let params = BlurParams::new(5, 3).unwrap();
//! let blurred = blur(img, &params);
//! assert!(blurred.pixel(32, 32)[0] < 1.0);
//! assert!(blurred.pixel(33, 32)[0] > 0.0);
//! ```

use crate::{OpsError, OpsResult};
use fastblur_core::{transpose, PixelBuffer, PixelView, CHANNELS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

/// Odd-sized 1D box kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxKernel {
    size: usize,
}

impl BoxKernel {
    /// Kernel size used when none is given.
    pub const DEFAULT_SIZE: usize = 31;

    /// Creates a kernel of `size` taps.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `size` is zero or even.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastblur_ops::filter::BoxKernel;
    ///
    /// let k = BoxKernel::new(5).unwrap();
    /// assert_eq!(k.radius(), 2);
    /// assert!(BoxKernel::new(4).is_err());
    /// assert!(BoxKernel::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> OpsResult<Self> {
        if size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel size must be odd and positive, got {size}"
            )));
        }
        Ok(Self { size })
    }

    /// Number of taps, `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Taps on each side of the centre, `p = (n - 1) / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Weight of each tap, `a = 1 / n`.
    #[inline]
    pub fn weight(&self) -> f32 {
        1.0 / self.size as f32
    }

    /// Variance of `passes` applications of this kernel.
    pub fn variance(&self, passes: usize) -> f32 {
        let n = self.size as f32;
        passes as f32 * (n * n - 1.0) / 12.0
    }
}

impl Default for BoxKernel {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Kernel and pass count for [`blur`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurParams {
    kernel: BoxKernel,
    passes: usize,
}

impl BlurParams {
    /// Passes used when none are given.
    pub const DEFAULT_PASSES: usize = 4;

    /// Validates a kernel size and pass count.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for an even or zero kernel, or zero passes.
    pub fn new(kernel_size: usize, passes: usize) -> OpsResult<Self> {
        Self::with_kernel(BoxKernel::new(kernel_size)?, passes)
    }

    /// Pairs an already validated kernel with a pass count.
    pub fn with_kernel(kernel: BoxKernel, passes: usize) -> OpsResult<Self> {
        if passes == 0 {
            return Err(OpsError::InvalidParameter(
                "at least one pass is required".into(),
            ));
        }
        Ok(Self { kernel, passes })
    }

    /// The box kernel.
    #[inline]
    pub fn kernel(&self) -> BoxKernel {
        self.kernel
    }

    /// Passes per direction.
    #[inline]
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kernel: BoxKernel::default(),
            passes: Self::DEFAULT_PASSES,
        }
    }
}

/// Box-filters one interleaved RGB row.
///
/// `src` and `dst` hold the same number of pixels, three samples each.
/// Reads past either end are clamped to the edge pixel, so kernels wider
/// than the row are fine.
///
/// # Example
///
/// ```rust
/// use fastblur_ops::filter::{box_filter_row, BoxKernel};
///
/// let src = [0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 0.0, 0.0, 0.0];
/// let mut dst = [0.0; 9];
/// box_filter_row(&src, &mut dst, BoxKernel::new(3).unwrap());
/// assert_eq!(dst[0], 1.0);
/// assert_eq!(dst[3], 1.0);
/// ```
pub fn box_filter_row(src: &[f32], dst: &mut [f32], kernel: BoxKernel) {
    debug_assert_eq!(src.len(), dst.len(), "row length mismatch");
    let width = src.len() / CHANNELS;
    if width == 0 {
        return;
    }
    let last = width - 1;
    let p = kernel.radius();
    let q = p + 1;
    let a = kernel.weight();
    let px = |x: usize| {
        let i = x.min(last) * CHANNELS;
        &src[i..i + CHANNELS]
    };

    // Taps past the right edge all read the last pixel, so they are weighted
    // once instead of summed one by one.
    let inside = q.min(width);
    let overhang = (q - inside) as f32 * a;
    let mut acc = [0.0f32; CHANNELS];
    for (acc, &s) in acc.iter_mut().zip(px(0)) {
        *acc = q as f32 * a * s;
    }
    for x in 1..inside {
        for (acc, &s) in acc.iter_mut().zip(px(x)) {
            *acc += a * s;
        }
    }
    for (acc, &s) in acc.iter_mut().zip(px(last)) {
        *acc += overhang * s;
    }
    dst[..CHANNELS].copy_from_slice(&acc);

    for x in 1..width {
        let entering = px(x + p);
        let leaving = px(x.saturating_sub(q));
        for c in 0..CHANNELS {
            acc[c] += a * entering[c] - a * leaving[c];
        }
        dst[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
    }
}

/// Box-filters every row of `src` into `dst`.
///
/// `dst` is resized to the dimensions of `src`. Rows are independent and
/// run on the rayon pool when the `parallel` feature is enabled.
pub fn box_filter(src: &PixelView<'_>, dst: &mut PixelBuffer, kernel: BoxKernel) {
    let (width, height) = src.dimensions();
    trace!(width, height, kernel = kernel.size(), "box_filter");
    dst.ensure_size(width, height);
    if width == 0 || height == 0 {
        return;
    }
    let row_len = width * CHANNELS;

    #[cfg(feature = "parallel")]
    dst.as_mut_slice()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| box_filter_row(src.row(y), row, kernel));

    #[cfg(not(feature = "parallel"))]
    for (y, row) in dst.as_mut_slice().chunks_mut(row_len).enumerate() {
        box_filter_row(src.row(y), row, kernel);
    }
}

/// Front/back image pair for ping-pong passes.
///
/// Every step reads the front buffer, writes the back buffer and then swaps
/// them, so no pass ever reads the buffer it writes. Both allocations are
/// reused for the whole blur.
#[derive(Debug, Default)]
pub struct BufferPair {
    front: PixelBuffer,
    back: PixelBuffer,
}

impl BufferPair {
    /// Starts with `image` in front and an empty back buffer.
    pub fn new(image: PixelBuffer) -> Self {
        Self {
            front: image,
            back: PixelBuffer::empty(),
        }
    }

    /// The current image.
    #[inline]
    pub fn front(&self) -> &PixelBuffer {
        &self.front
    }

    /// Exchanges front and back.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// One horizontal box pass.
    pub fn filter(&mut self, kernel: BoxKernel) {
        box_filter(&self.front.view(), &mut self.back, kernel);
        self.swap();
    }

    /// Transposes the current image.
    pub fn transpose(&mut self) {
        let (width, height) = self.front.dimensions();
        trace!(width, height, "transpose");
        transpose(&self.front.view(), &mut self.back);
        self.swap();
    }

    /// Returns the current image.
    pub fn into_front(self) -> PixelBuffer {
        self.front
    }
}

/// Approximate Gaussian blur of a linear image.
///
/// Runs `passes` horizontal box passes, transposes, runs `passes` more and
/// transposes back. The result has the dimensions of `image`.
pub fn blur(image: PixelBuffer, params: &BlurParams) -> PixelBuffer {
    let (width, height) = image.dimensions();
    let kernel = params.kernel();
    trace!(width, height, kernel = kernel.size(), passes = params.passes(), "blur");
    debug!(width, height, kernel = kernel.size(), passes = params.passes(), "Applying box blur");

    if image.is_empty() {
        return image;
    }

    let mut pair = BufferPair::new(image);
    for _ in 0..params.passes() {
        pair.filter(kernel);
    }
    pair.transpose();
    for _ in 0..params.passes() {
        pair.filter(kernel);
    }
    pair.transpose();
    pair.into_front()
}
