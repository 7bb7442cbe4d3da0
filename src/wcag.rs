//! WCAG 2.0 contrast thresholds and the verdict derived from a ratio.
//!
//! See: <https://www.w3.org/TR/WCAG20/#visual-audio-contrast-contrast>

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::Scalar;

/// Minimum ratio for normal text at level AA (1.4.3).
pub const AA_NORMAL: Scalar = 4.5;
/// Minimum ratio for large text at level AA (1.4.3).
pub const AA_LARGE: Scalar = 3.0;
/// Minimum ratio for normal text at level AAA (1.4.6).
pub const AAA_NORMAL: Scalar = 7.0;
/// Minimum ratio for large text at level AAA (1.4.6).
pub const AAA_LARGE: Scalar = 4.5;

/// Which WCAG thresholds a contrast ratio satisfies. Each flag is checked on
/// its own, so a ratio passing AAA also reports AA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WcagVerdict {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

/// Normal and large text results for a single conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Conformance {
    pub normal_text: bool,
    pub large_text: bool,
}

impl WcagVerdict {
    pub fn from_ratio(ratio: Scalar) -> Self {
        WcagVerdict {
            aa_normal: ratio >= AA_NORMAL,
            aa_large: ratio >= AA_LARGE,
            aaa_normal: ratio >= AAA_NORMAL,
            aaa_large: ratio >= AAA_LARGE,
        }
    }

    pub fn aa(&self) -> Conformance {
        Conformance {
            normal_text: self.aa_normal,
            large_text: self.aa_large,
        }
    }

    pub fn aaa(&self) -> Conformance {
        Conformance {
            normal_text: self.aaa_normal,
            large_text: self.aaa_large,
        }
    }

    /// A pair passes when normal text meets AA.
    pub fn passes(&self) -> bool {
        self.aa_normal
    }
}

// Serialized per level (`wcag_aa`, `wcag_aaa`), the shape report consumers read.
impl Serialize for WcagVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("wcag_aa", &self.aa())?;
        map.serialize_entry("wcag_aaa", &self.aaa())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        let v = WcagVerdict::from_ratio(21.0);
        assert!(v.aa_normal && v.aa_large && v.aaa_normal && v.aaa_large);

        let v = WcagVerdict::from_ratio(1.0);
        assert!(!v.aa_normal && !v.aa_large && !v.aaa_normal && !v.aaa_large);

        let v = WcagVerdict::from_ratio(3.0);
        assert_eq!((false, true, false, false), (v.aa_normal, v.aa_large, v.aaa_normal, v.aaa_large));

        let v = WcagVerdict::from_ratio(4.5);
        assert_eq!((true, true, false, true), (v.aa_normal, v.aa_large, v.aaa_normal, v.aaa_large));

        let v = WcagVerdict::from_ratio(6.99);
        assert!(v.passes());
        assert!(!v.aaa_normal);

        let v = WcagVerdict::from_ratio(7.0);
        assert!(v.aaa_normal);
    }

    #[test]
    fn just_below_threshold_fails() {
        assert!(!WcagVerdict::from_ratio(4.499_999).passes());
        assert!(!WcagVerdict::from_ratio(2.999_999).aa_large);
    }

    #[test]
    fn serialize_per_level() {
        let json = serde_json::to_value(WcagVerdict::from_ratio(5.0)).unwrap();
        assert_eq!(
            serde_json::json!({
                "wcag_aa": {"normal_text": true, "large_text": true},
                "wcag_aaa": {"normal_text": false, "large_text": true},
            }),
            json
        );
    }
}
