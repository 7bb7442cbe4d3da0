use std::fmt::{self, Display};

use crate::types::Scalar;

/// Trim a number such that it fits into the range [lower, upper].
pub fn clamp(lower: Scalar, upper: Scalar, x: Scalar) -> Scalar {
    Scalar::max(Scalar::min(upper, x), lower)
}

/// Round to a fixed number of decimal places, as used for reported ratios.
pub fn round_to(x: Scalar, places: i32) -> Scalar {
    let scale = Scalar::powi(10.0, places);
    (x * scale).round() / scale
}

// `format!`-style format strings only allow specifying a fixed floating
// point precision, e.g. `{:.3}` to print 3 decimal places. This always
// displays trailing zeroes, while CSS colors generally omit them. For
// example, we'd prefer to print `0.5` as `0.5` instead of `0.500`.
//
// Note that this will round using omitted decimal places:
//
//     MaxPrecision::wrap(3, 0.5004) //=> 0.5
//     MaxPrecision::wrap(3, 0.5005) //=> 0.501
//
pub struct MaxPrecision {
    precision: u32,
    inner: f64,
}

impl MaxPrecision {
    pub fn wrap(precision: u32, inner: f64) -> Self {
        Self { precision, inner }
    }
}

impl Display for MaxPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pow_10 = 10u32.pow(self.precision) as f64;
        let rounded = (self.inner * pow_10).round() / pow_10;
        // avoid printing "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        write!(f, "{}", rounded)
    }
}
