use std::fmt;

use crate::{helper::clamp, types::Scalar, Color};

/// An sRGB triple, either as 8-bit integers or as floats between 0.0 and 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb<T> {
    pub r: T,
    pub g: T,
    pub b: T,
}

impl<T> Srgb<T> {
    #[inline]
    pub fn new(r: T, g: T, b: T) -> Self {
        Srgb { r, g, b }
    }
}

impl Srgb<u8> {
    /// Return the color as an integer in RGB representation (`0xRRGGBB`)
    #[inline]
    pub fn to_u32(&self) -> u32 {
        u32::from(self.r).wrapping_shl(16) + u32::from(self.g).wrapping_shl(8) + u32::from(self.b)
    }

    /// Format the color as a RGB-representation string (`#fc0070`).
    pub fn to_hex_string(&self, leading_hash: bool) -> String {
        format!(
            "{}{:02x}{:02x}{:02x}",
            if leading_hash { "#" } else { "" },
            self.r,
            self.g,
            self.b
        )
    }
}

impl From<&Color> for Srgb<u8> {
    fn from(color: &Color) -> Self {
        color.to_srgb()
    }
}

impl From<Srgb<u8>> for Srgb<Scalar> {
    fn from(c: Srgb<u8>) -> Self {
        Srgb::new(
            Scalar::from(c.r) / 255.0,
            Scalar::from(c.g) / 255.0,
            Scalar::from(c.b) / 255.0,
        )
    }
}

impl From<Srgb<Scalar>> for Srgb<u8> {
    /// Values outside of [0.0, 1.0] are clipped.
    fn from(c: Srgb<Scalar>) -> Self {
        // Tiny rounding errors in `f64` floating point calculations can cause effectively equal
        // values to round to different integers.  We expect `f64` rounding errors to be less than
        // the precision of an `f32` in most cases, so we can eliminate many of these rounding
        // anomalies by first converting the values to `f32` before rounding.
        let channel = |v: Scalar| f32::round((255.0 * clamp(0.0, 1.0, v)) as f32) as u8;

        Srgb::new(channel(c.r), channel(c.g), channel(c.b))
    }
}

impl fmt::Display for Srgb<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({r}, {g}, {b})", r = self.r, g = self.g, b = self.b,)
    }
}

impl fmt::Display for Srgb<Scalar> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({r:.3}, {g:.3}, {b:.3})",
            r = self.r,
            g = self.g,
            b = self.b,
        )
    }
}
