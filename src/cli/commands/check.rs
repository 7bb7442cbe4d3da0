use crate::commands::input::read_pairs;
use crate::commands::prelude::*;
use crate::config::{settings_from_matches, template_from_settings};

use contrast_checker::evaluate;
use tracing::warn;

pub struct CheckCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Html,
}

impl Format {
    fn from_matches(matches: &ArgMatches, config: &Config) -> Self {
        match matches.get_one::<String>("format").map(|f| f.to_lowercase()).as_deref() {
            Some("text") => Format::Text,
            Some("json") => Format::Json,
            Some("html") => Format::Html,
            _ if config.interactive_mode => Format::Text,
            _ => Format::Json,
        }
    }
}

impl GenericCommand for CheckCommand {
    fn run(&self, out: &mut Output, matches: &ArgMatches, config: &Config) -> Result<i32> {
        let settings = settings_from_matches(matches)?;
        let format = Format::from_matches(matches, config);
        // read the template up front so a bad file fails before any work is done
        let template = match format {
            Format::Html => Some(template_from_settings(&settings)?),
            Format::Text | Format::Json => None,
        };

        let pairs = read_pairs(matches)?;
        let report = evaluate(&pairs, &settings.policy);

        let dropped = pairs.len() - report.summary.total_pairs;
        if dropped > 0 {
            warn!("skipped {} pair(s) with an invalid color", dropped);
        }

        match (format, template) {
            (Format::Html, Some(template)) => {
                writeln!(out.handle, "{}", template.render_report(&report)?)?;
            }
            (Format::Json, _) | (Format::Html, None) => {
                let json = serde_json::to_string_pretty(&report).map_err(contrast_checker::Error::from)?;
                writeln!(out.handle, "{}", json)?;
            }
            (Format::Text, _) => out.show_report(config, &report)?,
        }

        Ok(if report.all_pass() { EXIT_PASS } else { EXIT_FAIL })
    }
}
