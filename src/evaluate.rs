//! Batch evaluation of color pairs: ratio, WCAG verdict, suggestions and
//! the summary counts.

use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::Result,
    helper::round_to,
    suggest::{suggest, Suggestion, SuggestionPolicy},
    types::Scalar,
    wcag::WcagVerdict,
    Color,
};

fn unknown_element() -> String {
    "Unknown".to_string()
}

/// A color field that is not a string becomes empty, so the pair is
/// dropped at evaluation.
fn lenient_color<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(color) => color,
        _ => String::new(),
    })
}

fn lenient_element<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(element) => element,
        _ => unknown_element(),
    })
}

/// Deserialize a list of pairs one record at a time. A record that is not
/// an object still takes its position in the batch but has no colors.
pub fn deserialize_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<PairInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<Value>::deserialize(deserializer)?;
    Ok(records.into_iter().map(PairInput::from_value).collect())
}

/// One foreground/background pair as it arrives from a caller.
///
/// Every field is optional on the wire and a value of the wrong type
/// counts as missing, so one malformed record only drops that record,
/// never the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct PairInput {
    /// Foreground (text) color as `#RRGGBB`.
    #[serde(default, deserialize_with = "lenient_color")]
    pub foreground: String,
    /// Background color as `#RRGGBB`.
    #[serde(default, deserialize_with = "lenient_color")]
    pub background: String,
    /// Description of the UI element using this pair.
    #[serde(default = "unknown_element", deserialize_with = "lenient_element")]
    pub element: String,
}

impl PairInput {
    pub fn new(foreground: &str, background: &str, element: &str) -> Self {
        PairInput {
            foreground: foreground.to_string(),
            background: background.to_string(),
            element: element.to_string(),
        }
    }

    /// Read a pair from an arbitrary JSON value. Anything that is not a
    /// pair record gives a pair without colors.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|err| {
            debug!(%err, "record is not a color pair");
            PairInput::new("", "", &unknown_element())
        })
    }
}

/// A parsed pair: both colors are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastPair {
    pub foreground: Color,
    pub background: Color,
    pub label: String,
}

impl ContrastPair {
    pub fn parse(input: &PairInput) -> Result<Self> {
        Ok(ContrastPair {
            foreground: input.foreground.parse()?,
            background: input.background.parse()?,
            label: input.element.clone(),
        })
    }

    pub fn ratio(&self) -> Scalar {
        self.foreground.contrast_ratio(&self.background)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

/// The evaluation of a single pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    /// `pair-<n>` where `n` is the position in the input, including any
    /// records that were dropped.
    #[serde(rename = "id")]
    pub pair_id: String,
    #[serde(rename = "text")]
    pub label: String,
    pub foreground: Color,
    pub background: Color,
    /// Contrast ratio rounded to one decimal place.
    #[serde(rename = "contrast_ratio")]
    pub ratio: Scalar,
    #[serde(flatten)]
    pub verdict: WcagVerdict,
    pub status: Status,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_pairs: usize,
    pub passing_pairs: usize,
    pub failing_pairs: usize,
    pub detected_texts: usize,
}

/// Everything a caller gets back for a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub color_pairs: Vec<PairResult>,
}

impl Report {
    pub fn all_pass(&self) -> bool {
        self.summary.failing_pairs == 0
    }
}

/// Evaluate a single pair. Suggestions are only searched for when the
/// pair fails AA for normal text.
pub fn evaluate_pair(index: usize, pair: &ContrastPair, policy: &SuggestionPolicy) -> PairResult {
    let ratio = pair.ratio();
    let verdict = WcagVerdict::from_ratio(ratio);

    let (status, suggestions) = if verdict.passes() {
        (Status::Pass, Vec::new())
    } else {
        (Status::Fail, suggest(&pair.foreground, &pair.background, policy))
    };

    PairResult {
        pair_id: format!("pair-{}", index),
        label: pair.label.clone(),
        foreground: pair.foreground,
        background: pair.background,
        ratio: round_to(ratio, 1),
        verdict,
        status,
        suggestions,
    }
}

/// Evaluate a batch of pairs.
///
/// Pairs with a color that does not parse are left out of the report and of
/// the counts. Pairs are evaluated in parallel, results keep input order.
pub fn evaluate(pairs: &[PairInput], policy: &SuggestionPolicy) -> Report {
    let color_pairs: Vec<PairResult> = pairs
        .par_iter()
        .enumerate()
        .filter_map(|(index, input)| match ContrastPair::parse(input) {
            Ok(pair) => Some(evaluate_pair(index, &pair, policy)),
            Err(err) => {
                debug!(index, element = %input.element, %err, "dropping pair");
                None
            }
        })
        .collect();

    let passing_pairs = color_pairs
        .iter()
        .filter(|result| result.status == Status::Pass)
        .count();
    let summary = Summary {
        total_pairs: color_pairs.len(),
        passing_pairs,
        failing_pairs: color_pairs.len() - passing_pairs,
        detected_texts: color_pairs.len(),
    };

    info!(
        received = pairs.len(),
        total = summary.total_pairs,
        passing = summary.passing_pairs,
        failing = summary.failing_pairs,
        "evaluated color pairs"
    );

    Report {
        summary,
        color_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn black_on_white() {
        let report = evaluate(
            &[PairInput::new("#000000", "#FFFFFF", "title")],
            &SuggestionPolicy::default(),
        );

        assert_eq!(1, report.summary.total_pairs);
        assert_eq!(1, report.summary.passing_pairs);
        let result = &report.color_pairs[0];
        assert_eq!("pair-0", result.pair_id);
        assert_eq!("title", result.label);
        assert_relative_eq!(21.0, result.ratio);
        assert!(result.verdict.aa_normal);
        assert!(result.verdict.aaa_normal);
        assert_eq!(Status::Pass, result.status);
        assert!(result.suggestions.is_empty());
        assert!(report.all_pass());
    }

    #[test]
    fn gray_on_gray() {
        let report = evaluate(
            &[PairInput::new("#777777", "#888888", "body")],
            &SuggestionPolicy::default(),
        );

        let result = &report.color_pairs[0];
        assert_relative_eq!(1.3, result.ratio);
        assert_eq!(Status::Fail, result.status);
        assert!(!result.suggestions.is_empty());
        assert!(result.suggestions.iter().all(|s| s.resulting_ratio >= 4.5));
        assert_eq!(1, report.summary.failing_pairs);
        assert!(!report.all_pass());
    }

    #[test]
    fn malformed_pairs_are_dropped() {
        let pairs = [
            PairInput::new("notacolor", "#ffffff", "a"),
            PairInput::new("#000000", "#ffffff", "b"),
            PairInput::new("#000000", "#ZZZZZZ", "c"),
            PairInput::new("#777777", "#888888", "d"),
        ];
        let report = evaluate(&pairs, &SuggestionPolicy::default());

        assert_eq!(
            Summary {
                total_pairs: 2,
                passing_pairs: 1,
                failing_pairs: 1,
                detected_texts: 2
            },
            report.summary
        );
        let ids: Vec<&str> = report.color_pairs.iter().map(|r| r.pair_id.as_str()).collect();
        assert_eq!(vec!["pair-1", "pair-3"], ids);
    }

    #[test]
    fn order_is_preserved() {
        let pairs: Vec<PairInput> = (0..64u8)
            .map(|i| {
                let v = format!("#{:02x}{:02x}{:02x}", i * 4, i * 4, i * 4);
                PairInput::new(&v, "#ffffff", &format!("e{}", i))
            })
            .collect();
        let report = evaluate(&pairs, &SuggestionPolicy::default());

        assert_eq!(64, report.color_pairs.len());
        for (i, result) in report.color_pairs.iter().enumerate() {
            assert_eq!(format!("pair-{}", i), result.pair_id);
            assert_eq!(format!("e{}", i), result.label);
        }
    }

    #[test]
    fn empty_batch() {
        let report = evaluate(&[], &SuggestionPolicy::default());
        assert_eq!(Summary::default(), report.summary);
        assert!(report.color_pairs.is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let input: PairInput = serde_json::from_str(r##"{"foreground": "#000000"}"##).unwrap();
        assert_eq!("", input.background);
        assert_eq!("Unknown", input.element);
        assert!(ContrastPair::parse(&input).is_err());
    }

    #[test]
    fn wrong_types_drop_only_their_record() {
        #[derive(Deserialize)]
        struct Batch {
            #[serde(deserialize_with = "deserialize_pairs")]
            color_pairs: Vec<PairInput>,
        }

        let batch: Batch = serde_json::from_str(
            r##"{"color_pairs": [
                {"foreground": null, "background": "#ffffff"},
                42,
                {"foreground": 123456, "background": "#ffffff", "element": 7},
                "#000000/#ffffff",
                {"foreground": "#000000", "background": "#ffffff", "element": "title"}
            ]}"##,
        )
        .unwrap();

        assert_eq!(5, batch.color_pairs.len());
        assert_eq!(PairInput::new("", "#ffffff", "Unknown"), batch.color_pairs[2]);

        let report = evaluate(&batch.color_pairs, &SuggestionPolicy::default());
        assert_eq!(1, report.summary.total_pairs);
        assert_eq!("pair-4", report.color_pairs[0].pair_id);
        assert_eq!("title", report.color_pairs[0].label);
    }

    #[test]
    fn serialize_report() {
        let report = evaluate(
            &[PairInput::new("#000000", "#FFFFFF", "title")],
            &SuggestionPolicy::default(),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            serde_json::json!({
                "summary": {
                    "total_pairs": 1,
                    "passing_pairs": 1,
                    "failing_pairs": 0,
                    "detected_texts": 1
                },
                "color_pairs": [{
                    "id": "pair-0",
                    "text": "title",
                    "foreground": "#000000",
                    "background": "#ffffff",
                    "contrast_ratio": 21.0,
                    "wcag_aa": {"normal_text": true, "large_text": true},
                    "wcag_aaa": {"normal_text": true, "large_text": true},
                    "status": "pass",
                    "suggestions": []
                }]
            }),
            json
        );
    }
}
