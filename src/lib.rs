pub mod config;
pub mod convert;
pub mod error;
pub mod evaluate;
mod helper;
pub mod matrix;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod oklch;
pub mod parser;
pub mod rgb;
pub mod suggest;
pub mod template;
mod types;
pub mod wcag;

#[cfg(test)]
mod test_helper;

use std::{fmt, str::FromStr};

pub use config::Settings;
pub use error::{Error, Result};
pub use evaluate::{evaluate, evaluate_pair, ContrastPair, PairInput, PairResult, Report, Status, Summary};
pub use oklch::OkLch;
pub use rgb::Srgb;
pub use suggest::{suggest, Adjustment, Directions, Suggestion, SuggestionPolicy};
pub use template::Template;
pub use types::Scalar;
pub use wcag::{Conformance, WcagVerdict};

/// An opaque sRGB color.
///
/// A `Color` is always fully specified: it can only be created from valid
/// 8-bit channels (directly, by parsing a `#RRGGBB` string, or by mapping an
/// OKLCH color into the sRGB gamut). Colors are immutable values, every
/// adjustment returns a new `Color`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    rgb: Srgb<u8>,
}

impl Color {
    /// Create a `Color` from integer RGB values between 0 and 255.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color {
            rgb: Srgb::new(r, g, b),
        }
    }

    #[inline]
    pub fn from_srgb(rgb: Srgb<u8>) -> Color {
        Color { rgb }
    }

    /// Create a `Color` from RGB values between 0.0 and 1.0. Values outside this range will be
    /// clamped.
    #[inline]
    pub fn from_rgb_float(r: Scalar, g: Scalar, b: Scalar) -> Color {
        Self::from_srgb(Srgb::<u8>::from(Srgb::new(r, g, b)))
    }

    /// Map an OKLCH color into sRGB (see [`OkLch::to_color`]).
    #[inline]
    pub fn from_oklch(l: Scalar, c: Scalar, h: Scalar) -> Result<Color> {
        OkLch::new(l, c, h).to_color()
    }

    /// Get the red, green and blue channels as integers from 0 to 255.
    #[inline]
    pub fn to_srgb(&self) -> Srgb<u8> {
        self.rgb
    }

    /// Get the red, green and blue channels as numbers between 0.0 and 1.0.
    #[inline]
    pub fn to_srgb_float(&self) -> Srgb<Scalar> {
        Srgb::<Scalar>::from(self.rgb)
    }

    /// Return the color as an integer in RGB representation (`0xRRGGBB`)
    #[inline]
    pub fn to_u32(&self) -> u32 {
        self.rgb.to_u32()
    }

    /// Format the color as a RGB-representation string (`#fc0070`).
    #[inline]
    pub fn to_rgb_hex_string(&self, leading_hash: bool) -> String {
        self.rgb.to_hex_string(leading_hash)
    }

    /// Get lightness, chroma and hue in the OKLCH color space.
    ///
    /// See: <https://bottosson.github.io/posts/oklab/>
    #[inline]
    pub fn to_oklch(&self) -> OkLch {
        OkLch::from(self)
    }

    /// Set the OKLCH lightness (clamped to [0, 1]) while keeping chroma and hue.
    pub fn with_oklch_lightness(&self, lightness: Scalar) -> Result<Color> {
        self.to_oklch().with_lightness(lightness).to_color()
    }

    /// Pure black.
    pub fn black() -> Color {
        Color::from_rgb(0, 0, 0)
    }

    /// Pure white.
    pub fn white() -> Color {
        Color::from_rgb(255, 255, 255)
    }

    /// The relative brightness of a color (normalized to 0.0 for darkest black
    /// and 1.0 for lightest white), according to the WCAG definition.
    ///
    /// See: <https://www.w3.org/TR/2008/REC-WCAG20-20081211/#relativeluminancedef>
    pub fn luminance(&self) -> Scalar {
        let c = self.to_srgb_float();
        let r = convert::wcag_linear(c.r);
        let g = convert::wcag_linear(c.g);
        let b = convert::wcag_linear(c.b);

        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Contrast ratio between two colors as defined by the WCAG. The ratio can range from 1.0
    /// to 21.0 and does not depend on the order of the two colors.
    ///
    /// <https://www.w3.org/TR/2008/REC-WCAG20-20081211/#contrast-ratiodef>
    pub fn contrast_ratio(&self, other: &Color) -> Scalar {
        let l_self = self.luminance();
        let l_other = other.luminance();

        let (lighter, darker) = if l_self > l_other {
            (l_self, l_other)
        } else {
            (l_other, l_self)
        };

        helper::clamp(1.0, 21.0, (lighter + 0.05) / (darker + 0.05))
    }
}

// by default Colors will be printed in hex format
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rgb_hex_string(true))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::from_{}", self.rgb)
    }
}

// serialized as `#rrggbb`
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_color(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}
