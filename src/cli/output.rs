use std::io::Write;

use anstyle::{RgbColor, Style};
use contrast_checker::{Color, Conformance, PairResult, Report, Status, Suggestion, WcagVerdict};

use crate::config::Config;
use crate::error::Result;

/// Paints text with 24-bit ANSI colors, or leaves it alone when colors are
/// off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    enabled: bool,
}

impl Brush {
    pub fn from_environment(enabled: bool) -> Self {
        Brush { enabled }
    }

    pub fn paint(&self, text: &str, fg: &Color, bg: &Color) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let style = Style::new()
            .fg_color(Some(rgb(fg).into()))
            .bg_color(Some(rgb(bg).into()));
        format!("{}{}{}", style.render(), text, style.render_reset())
    }

    pub fn bold(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let style = Style::new().bold();
        format!("{}{}{}", style.render(), text, style.render_reset())
    }
}

fn rgb(color: &Color) -> RgbColor {
    let c = color.to_srgb();
    RgbColor(c.r, c.g, c.b)
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn level(name: &str, c: Conformance) -> String {
    format!("{name} normal {} large {}", mark(c.normal_text), mark(c.large_text))
}

pub fn verdict_line(verdict: &WcagVerdict) -> String {
    format!("{}  {}", level("AA", verdict.aa()), level("AAA", verdict.aaa()))
}

pub struct Output<'a> {
    pub handle: &'a mut dyn Write,
}

impl Output<'_> {
    pub fn new(handle: &mut dyn Write) -> Output {
        Output { handle }
    }

    fn show_suggestion(&mut self, config: &Config, suggestion: &Suggestion) -> Result<()> {
        writeln!(
            self.handle,
            "    {} {:<18} {} on {}  {:.1}:1",
            config
                .brush
                .paint(" Aa ", &suggestion.foreground, &suggestion.background),
            suggestion.kind.description(),
            suggestion.foreground,
            suggestion.background,
            suggestion.resulting_ratio,
        )?;
        writeln!(
            self.handle,
            "         fg {}  bg {}",
            suggestion.foreground_oklch, suggestion.background_oklch
        )?;
        Ok(())
    }

    pub fn show_pair(&mut self, config: &Config, result: &PairResult) -> Result<()> {
        let status = match result.status {
            Status::Pass => "pass",
            Status::Fail => "FAIL",
        };
        writeln!(
            self.handle,
            "{} {}  {}  {} on {}  {:.1}:1  {}",
            config.brush.paint(" Aa ", &result.foreground, &result.background),
            config.brush.bold(status),
            result.pair_id,
            result.foreground,
            result.background,
            result.ratio,
            result.label,
        )?;
        writeln!(self.handle, "     {}", verdict_line(&result.verdict))?;

        if result.status == Status::Fail && result.suggestions.is_empty() {
            writeln!(self.handle, "    no lightness adjustment within range reaches the target")?;
        }
        for suggestion in &result.suggestions {
            self.show_suggestion(config, suggestion)?;
        }
        Ok(())
    }

    pub fn show_report(&mut self, config: &Config, report: &Report) -> Result<()> {
        for result in &report.color_pairs {
            self.show_pair(config, result)?;
        }
        if !report.color_pairs.is_empty() {
            writeln!(self.handle)?;
        }
        writeln!(
            self.handle,
            "{} of {} pairs pass, {} fail",
            report.summary.passing_pairs, report.summary.total_pairs, report.summary.failing_pairs
        )?;
        Ok(())
    }
}
