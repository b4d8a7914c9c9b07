//! Gamma transfer between 8-bit encoded samples and linear light.
//!
//! Two modes are available, chosen once per run:
//!
//! | Mode | Decode | Encode |
//! |------|--------|--------|
//! | [`GammaMode::Exact`] | `LUT[v] = (v/255)^2.2` | `round(255 * l^(1/2.2))` |
//! | [`GammaMode::Fast`] | `(v/255)^2` | `round(255 * sqrt(l))` |
//!
//! The fast mode approximates gamma 2.2 with 2.0, trading accuracy for a
//! multiply on decode and a square root on encode. A [`Gamma`] value holds
//! exactly one mode, so a decode/encode round trip can't mix them.
//!
//! # Range
//!
//! - Decode: [0, 255] -> [0, 1]
//! - Encode: [0, 1] -> [0, 255], inputs outside [0, 1] are clamped first

use std::fmt;
use std::str::FromStr;

/// Display gamma assumed for 8-bit input and output.
pub const GAMMA: f32 = 2.2;

/// EOTF for arbitrary gamma: `v^gamma`
///
/// # Example
///
/// ```rust
/// use fastblur_transfer::gamma::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else {
        v.powf(gamma)
    }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`
///
/// # Example
///
/// ```rust
/// use fastblur_transfer::gamma::gamma_oetf;
///
/// let encoded = gamma_oetf(0.218, 2.2);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 {
        0.0
    } else {
        l.powf(1.0 / gamma)
    }
}

/// Selects how 8-bit samples are linearized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GammaMode {
    /// Gamma 2.2 through a 256-entry lookup table.
    #[default]
    Exact,
    /// Gamma 2.0 approximation (square / square root).
    Fast,
}

impl GammaMode {
    /// Picks [`Fast`](Self::Fast) when `fast` is set.
    #[inline]
    pub fn from_fast_flag(fast: bool) -> Self {
        if fast { Self::Fast } else { Self::Exact }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for GammaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GammaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "2.2" => Ok(Self::Exact),
            "fast" | "2.0" | "2" => Ok(Self::Fast),
            other => Err(format!("unknown gamma mode '{other}' (expected exact or fast)")),
        }
    }
}

/// Precomputed gamma 2.2 decode table, one entry per 8-bit value.
///
/// Built once by the caller and shared by reference; it never changes
/// after construction.
///
/// # Example
///
/// ```rust
/// use fastblur_transfer::GammaLut;
///
/// let lut = GammaLut::new();
/// assert_eq!(lut.get(0), 0.0);
/// assert!((lut.get(255) - 1.0).abs() < 1e-6);
/// ```
#[derive(Clone)]
pub struct GammaLut {
    table: [f32; 256],
}

impl GammaLut {
    /// Builds the table: `table[v] = (v/255)^2.2`.
    pub fn new() -> Self {
        let mut table = [0.0f32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = gamma_eotf(i as f32 / 255.0, GAMMA);
        }
        Self { table }
    }

    /// Linear value for encoded byte `v`.
    #[inline]
    pub fn get(&self, v: u8) -> f32 {
        self.table[v as usize]
    }

    /// The whole table.
    #[inline]
    pub fn as_slice(&self) -> &[f32; 256] {
        &self.table
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GammaLut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GammaLut").field("gamma", &GAMMA).finish()
    }
}

/// Gamma transfer for one run.
///
/// Construct it once from a [`GammaMode`]; in exact mode this builds the
/// lookup table before the first decode.
///
/// # Example
///
/// ```rust
/// use fastblur_transfer::{Gamma, GammaMode};
///
/// for mode in [GammaMode::Exact, GammaMode::Fast] {
///     let gamma = Gamma::new(mode);
///     assert_eq!(gamma.encode(gamma.decode(200)), 200);
/// }
/// ```
#[derive(Debug, Clone)]
pub enum Gamma {
    /// Gamma 2.2 with its decode table.
    Exact(GammaLut),
    /// Gamma 2.0 approximation.
    Fast,
}

impl Gamma {
    /// Creates the transfer for `mode`.
    pub fn new(mode: GammaMode) -> Self {
        match mode {
            GammaMode::Exact => Self::Exact(GammaLut::new()),
            GammaMode::Fast => Self::Fast,
        }
    }

    /// The mode this transfer was built for.
    pub fn mode(&self) -> GammaMode {
        match self {
            Self::Exact(_) => GammaMode::Exact,
            Self::Fast => GammaMode::Fast,
        }
    }

    /// Encoded byte -> linear light.
    #[inline]
    pub fn decode(&self, v: u8) -> f32 {
        match self {
            Self::Exact(lut) => lut.get(v),
            Self::Fast => {
                let x = v as f32 / 255.0;
                x * x
            }
        }
    }

    /// Linear light -> encoded byte, rounded to nearest.
    #[inline]
    pub fn encode(&self, l: f32) -> u8 {
        let l = l.clamp(0.0, 1.0);
        let encoded = match self {
            Self::Exact(_) => gamma_oetf(l, GAMMA),
            Self::Fast => l.sqrt(),
        };
        (255.0 * encoded).round() as u8
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Self::new(GammaMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gamma22_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let linear = gamma_eotf(v, GAMMA);
            let back = gamma_oetf(linear, GAMMA);
            assert!((v - back).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gamma_identity() {
        assert_eq!(gamma_eotf(0.5, 1.0), 0.5);
        assert_eq!(gamma_oetf(0.5, 1.0), 0.5);
    }

    #[test]
    fn test_lut_matches_power() {
        let lut = GammaLut::new();
        for v in 0..=255u8 {
            let expected = (v as f32 / 255.0).powf(2.2);
            assert_abs_diff_eq!(lut.get(v), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_lut_monotonic() {
        let lut = GammaLut::new();
        for pair in lut.as_slice().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_byte_roundtrip_both_modes() {
        for mode in [GammaMode::Exact, GammaMode::Fast] {
            let gamma = Gamma::new(mode);
            for v in 0..=255u8 {
                let back = gamma.encode(gamma.decode(v));
                assert!(
                    (back as i32 - v as i32).abs() <= 1,
                    "{mode}: {v} -> {back}"
                );
            }
        }
    }

    #[test]
    fn test_linear_roundtrip_both_modes() {
        for mode in [GammaMode::Exact, GammaMode::Fast] {
            let gamma = Gamma::new(mode);
            for i in 0..=1000 {
                let l = i as f32 / 1000.0;
                let back = gamma.decode(gamma.encode(l));
                // Half a code value at the steepest part of the curve.
                assert!((back - l).abs() < 0.005, "{mode}: {l} -> {back}");
                // Re-encoding a decoded value is stable.
                assert_eq!(gamma.encode(back), gamma.encode(l));
            }
        }
    }

    #[test]
    fn test_fast_decode() {
        let gamma = Gamma::new(GammaMode::Fast);
        assert_abs_diff_eq!(gamma.decode(128), (128.0f32 / 255.0).powi(2), epsilon = 1e-7);
        assert_eq!(gamma.encode(0.5), 180);
    }

    #[test]
    fn test_encode_clamps() {
        for mode in [GammaMode::Exact, GammaMode::Fast] {
            let gamma = Gamma::new(mode);
            assert_eq!(gamma.encode(-0.25), 0);
            assert_eq!(gamma.encode(1.75), 255);
            assert_eq!(gamma.encode(1.0), 255);
            assert_eq!(gamma.encode(0.0), 0);
        }
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Fast".parse::<GammaMode>().unwrap(), GammaMode::Fast);
        assert_eq!("exact".parse::<GammaMode>().unwrap(), GammaMode::Exact);
        assert!("linear".parse::<GammaMode>().is_err());
        assert_eq!(GammaMode::from_fast_flag(true), GammaMode::Fast);
        assert_eq!(Gamma::new(GammaMode::Fast).mode(), GammaMode::Fast);
    }
}
