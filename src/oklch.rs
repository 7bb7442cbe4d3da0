use std::fmt;

use crate::{
    convert::{
        gam_srgb, lab_to_lch, lch_to_lab, lin_srgb, lin_srgb_to_xyz, oklab_to_xyz, xyz_to_lin_srgb,
        xyz_to_oklab,
    },
    error::{Error, Result},
    helper::{clamp, MaxPrecision},
    rgb::Srgb,
    types::{Scalar, Vec3},
    Color,
};

/// Chroma below which the hue is meaningless and printed as `none`.
const ACHROMATIC_THRESHOLD: Scalar = 1e-4;

/// Tolerance when deciding whether a gamma-encoded channel is inside [0, 1].
const GAMUT_EPSILON: Scalar = 1e-6;

/// Bisection steps used to reduce chroma into the sRGB gamut.
const GAMUT_ITERATIONS: usize = 32;

/// A color in the OKLCH space: perceptual lightness (0.0 - 1.0), chroma and
/// hue in degrees.
///
/// See: <https://bottosson.github.io/posts/oklab/>
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: Scalar,
    pub c: Scalar,
    pub h: Scalar,
}

impl OkLch {
    #[inline]
    pub fn new(l: Scalar, c: Scalar, h: Scalar) -> Self {
        OkLch { l, c, h }
    }

    /// The same chroma and hue at a different lightness. The lightness is
    /// clamped to [0, 1].
    pub fn with_lightness(&self, l: Scalar) -> Self {
        OkLch::new(clamp(0.0, 1.0, l), self.c, self.h)
    }

    /// Map this color to an sRGB `Color`.
    ///
    /// Colors outside of the sRGB gamut are brought inside by lowering the
    /// chroma at fixed lightness and hue, so lightness is preserved exactly
    /// and the hue stays recognisable.
    pub fn to_color(&self) -> Result<Color> {
        if !(self.l.is_finite() && self.c.is_finite() && self.h.is_finite()) {
            return Err(Error::Conversion(format!("non-finite coordinates in {}", self)));
        }

        let l = clamp(0.0, 1.0, self.l);
        let c = Scalar::max(self.c, 0.0);

        let mut rgb = gamma_encoded(l, c, self.h);
        if !in_gamut(rgb) {
            let (mut low, mut high) = (0.0, c);
            for _ in 0..GAMUT_ITERATIONS {
                let mid = (low + high) / 2.0;
                if in_gamut(gamma_encoded(l, mid, self.h)) {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            rgb = gamma_encoded(l, low, self.h);
        }

        let [r, g, b] = rgb;
        if !(r.is_finite() && g.is_finite() && b.is_finite()) {
            return Err(Error::Conversion(format!(
                "{} has no sRGB representation",
                self
            )));
        }

        Ok(Color::from_srgb(Srgb::<u8>::from(Srgb::new(r, g, b))))
    }

    /// Format as a CSS Color 4 `oklch()` function (`oklch(62.68% 0.1 250.2)`).
    pub fn to_color_string(&self) -> String {
        self.to_string()
    }
}

fn gamma_encoded(l: Scalar, c: Scalar, h: Scalar) -> Vec3 {
    gam_srgb(xyz_to_lin_srgb(oklab_to_xyz(lch_to_lab([l, c, h]))))
}

fn in_gamut(rgb: Vec3) -> bool {
    rgb.iter()
        .all(|v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(v))
}

impl From<&Color> for OkLch {
    fn from(color: &Color) -> Self {
        let Srgb { r, g, b } = Srgb::<Scalar>::from(color.to_srgb());
        let [l, c, h] = lab_to_lch(xyz_to_oklab(lin_srgb_to_xyz(lin_srgb([r, g, b]))));

        OkLch::new(l, c, h)
    }
}

impl fmt::Display for OkLch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = MaxPrecision::wrap(2, 100.0 * self.l);
        let c = MaxPrecision::wrap(4, self.c);
        if self.c < ACHROMATIC_THRESHOLD {
            write!(f, "oklch({l}% {c} none)")
        } else {
            write!(f, "oklch({l}% {c} {h})", h = MaxPrecision::wrap(2, self.h))
        }
    }
}

impl serde::Serialize for OkLch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::assert_almost_equal;
    use approx::assert_relative_eq;

    #[test]
    fn grays_have_no_chroma() {
        let white = Color::white().to_oklch();
        assert_relative_eq!(1.0, white.l, max_relative = 1e-6);
        assert!(white.c < ACHROMATIC_THRESHOLD);

        let black = Color::black().to_oklch();
        assert_relative_eq!(0.0, black.l, epsilon = 1e-9);

        // Oklab lightness of a neutral gray is the cube root of its luminance
        let gray = Color::from_rgb(0x88, 0x88, 0x88).to_oklch();
        assert_relative_eq!(0.6268, gray.l, max_relative = 1e-3);
    }

    #[test]
    fn known_values() {
        // reference values from the CSS Color 4 sample code
        let red = Color::from_rgb(255, 0, 0).to_oklch();
        assert_relative_eq!(0.62796, red.l, max_relative = 1e-4);
        assert_relative_eq!(0.25768, red.c, max_relative = 1e-3);
        assert_relative_eq!(29.23, red.h, max_relative = 1e-3);
    }

    #[test]
    fn roundtrip() {
        for hex in ["#ff0000", "#1e90ff", "#777777", "#c0ffee", "#010203", "#fefefe"] {
            let color: Color = hex.parse().unwrap();
            let back = color.to_oklch().to_color().unwrap();
            assert_almost_equal(&color, &back);
        }
    }

    #[test]
    fn lightness_is_clamped() {
        let c = OkLch::new(0.5, 0.1, 120.0);
        assert_eq!(1.0, c.with_lightness(1.7).l);
        assert_eq!(0.0, c.with_lightness(-0.2).l);
        assert_eq!(0.1, c.with_lightness(0.9).c);
    }

    #[test]
    fn out_of_gamut_reduces_chroma() {
        // very light and very saturated: far outside sRGB
        let color = OkLch::new(0.95, 0.3, 29.0).to_color().unwrap();
        let mapped = color.to_oklch();
        assert_relative_eq!(0.95, mapped.l, max_relative = 0.01);
        assert!(mapped.c < 0.3);

        assert_eq!(Color::white(), OkLch::new(1.0, 0.2, 200.0).to_color().unwrap());
        assert_eq!(Color::black(), OkLch::new(0.0, 0.2, 200.0).to_color().unwrap());
    }

    #[test]
    fn non_finite_is_an_error() {
        assert!(OkLch::new(Scalar::NAN, 0.0, 0.0).to_color().is_err());
        assert!(OkLch::new(0.5, Scalar::INFINITY, 0.0).to_color().is_err());
    }

    #[test]
    fn to_color_string() {
        assert_eq!("oklch(50% 0.1 120)", OkLch::new(0.5, 0.1, 120.0).to_color_string());
        assert_eq!(
            "oklch(62.68% 0.1235 250.46)",
            OkLch::new(0.626_84, 0.123_456, 250.456).to_color_string()
        );
        assert_eq!("oklch(100% 0 none)", Color::white().to_oklch().to_color_string());
    }
}
