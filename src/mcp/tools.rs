//! Input schema and body of the `check_color_accessibility` tool.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::warn;

use crate::evaluate::deserialize_pairs;
use crate::{evaluate, PairInput, Report, SuggestionPolicy, Template};

/// Input parameters for the check_color_accessibility tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckInput {
    /// Foreground/background color pairs to check.
    #[schemars(description = "Array of foreground/background color pairs")]
    #[serde(deserialize_with = "deserialize_pairs")]
    pub color_pairs: Vec<PairInput>,
}

/// What the tool sends back: the rendered widget and the raw report.
#[derive(Debug)]
pub struct CheckOutput {
    pub html: String,
    pub json: String,
    pub report: Report,
}

/// Evaluate the pairs and render the widget. A rendering failure does not
/// fail the call, the widget is replaced by an error fragment.
pub fn run_check(
    input: &CheckInput,
    policy: &SuggestionPolicy,
    template: &Template,
) -> Result<CheckOutput, serde_json::Error> {
    let report = evaluate(&input.color_pairs, policy);
    let json = serde_json::to_string(&report)?;

    let html = match template.render_report(&report) {
        Ok(html) => html,
        Err(err) => {
            warn!(%err, "falling back to error fragment");
            error_fragment(&err.to_string())
        }
    };

    Ok(CheckOutput { html, json, report })
}

fn error_fragment(message: &str) -> String {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<h1>Error loading template: {}</h1>", escaped)
}
