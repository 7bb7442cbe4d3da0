//! HTML report rendering with `{{ name }}` placeholders.

use std::{collections::HashMap, fs, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{Error, Result},
    evaluate::Report,
};

/// Placeholder that receives the report JSON.
pub const REPORT_PLACEHOLDER: &str = "report";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
});

static WIDGET: Lazy<Template> = Lazy::new(|| Template::parse(include_str!("../templates/widget.html")));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed template: literal text interleaved with named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for captures in PLACEHOLDER.captures_iter(source) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Placeholder(name.as_str().to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Text(source[last..].to_string()));
        }

        Template { segments }
    }

    /// Read a report template from disk. The template must contain a
    /// `{{ report }}` placeholder.
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = Self::parse(&fs::read_to_string(path)?);
        if !template.has_placeholder(REPORT_PLACEHOLDER) {
            return Err(Error::Template(format!(
                "'{}' has no {{{{ {} }}}} placeholder",
                path.display(),
                REPORT_PLACEHOLDER
            )));
        }
        Ok(template)
    }

    /// The built-in widget.
    pub fn widget() -> &'static Template {
        &WIDGET
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Substitute every placeholder. Values are inserted verbatim, a
    /// placeholder without a value is an error.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| Error::Template(format!("no value for placeholder '{}'", name)))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Render a report into the `report` placeholder as JSON that is safe to
    /// embed in a `<script>` element.
    pub fn render_report(&self, report: &Report) -> Result<String> {
        let json = script_safe(&serde_json::to_string(report)?);
        let title = format!(
            "{} of {} pairs pass",
            report.summary.passing_pairs, report.summary.total_pairs
        );

        let mut values = HashMap::new();
        values.insert(REPORT_PLACEHOLDER, json);
        values.insert("title", title);
        values.insert("version", env!("CARGO_PKG_VERSION").to_string());
        self.render(&values)
    }
}

impl Default for Template {
    fn default() -> Self {
        Template::widget().clone()
    }
}

/// Escape characters that could close the surrounding script element or
/// open an HTML comment. The result is still valid JSON.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate, PairInput, SuggestionPolicy};

    #[test]
    fn parse_and_render() {
        let template = Template::parse("<h1>{{title}}</h1>{{ report }}!");
        assert_eq!(vec!["title", "report"], template.placeholders().collect::<Vec<_>>());

        let mut values = HashMap::new();
        values.insert("title", "Hi".to_string());
        values.insert("report", "{}".to_string());
        assert_eq!("<h1>Hi</h1>{}!", template.render(&values).unwrap());
    }

    #[test]
    fn missing_value_is_an_error() {
        let template = Template::parse("{{ report }}");
        assert!(matches!(template.render(&HashMap::new()), Err(Error::Template(_))));
    }

    #[test]
    fn text_without_placeholders() {
        let template = Template::parse("no {{ 1x }} here {single}");
        assert_eq!(0, template.placeholders().count());
        assert_eq!("no {{ 1x }} here {single}", template.render(&HashMap::new()).unwrap());
    }

    #[test]
    fn report_is_escaped() {
        let report = evaluate(
            &[PairInput::new("#000000", "#ffffff", "</script><b>&")],
            &SuggestionPolicy::default(),
        );
        let html = Template::parse("<script>const data = {{ report }};</script>")
            .render_report(&report)
            .unwrap();

        assert_eq!(1, html.matches("</script>").count());
        assert!(html.contains(r"\u003c/script\u003e\u003cb\u003e\u0026"));

        let json = html
            .trim_start_matches("<script>const data = ")
            .trim_end_matches(";</script>");
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!("</script><b>&", value["color_pairs"][0]["text"]);
    }

    #[test]
    fn widget_renders() {
        assert!(Template::widget().has_placeholder(REPORT_PLACEHOLDER));

        let report = evaluate(
            &[PairInput::new("#777777", "#888888", "body")],
            &SuggestionPolicy::default(),
        );
        let html = Template::widget().render_report(&report).unwrap();
        assert!(html.contains("\"failing_pairs\":1"));
        assert!(html.contains("0 of 1 pairs pass"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn from_file_requires_report_placeholder() {
        let dir = std::env::temp_dir().join(format!("contrast-checker-template-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.html");
        fs::write(&good, "<pre>{{report}}</pre>").unwrap();
        assert!(Template::from_file(&good).is_ok());

        let bad = dir.join("bad.html");
        fs::write(&bad, "<pre>{{ title }}</pre>").unwrap();
        assert!(matches!(Template::from_file(&bad), Err(Error::Template(_))));

        assert!(matches!(
            Template::from_file(&dir.join("missing.html")),
            Err(Error::Io(_))
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
