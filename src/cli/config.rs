use std::path::PathBuf;

use clap::ArgMatches;
use contrast_checker::{Settings, Template};

use crate::error::Result;
use crate::output::Brush;

/// Terminal-related settings shared by all commands.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub interactive_mode: bool,
    pub brush: Brush,
}

/// Load the settings file (if any) and apply command line overrides on top.
pub fn settings_from_matches(matches: &ArgMatches) -> Result<Settings> {
    let mut settings = match matches.get_one::<PathBuf>("config") {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let policy = &mut settings.policy;
    if let Some(&target) = matches.get_one::<f64>("target") {
        policy.target_ratio = target;
    }
    if let Some(&step) = matches.get_one::<f64>("step") {
        policy.step = step;
    }
    if let Some(&bound) = matches.get_one::<f64>("bound") {
        policy.bound = bound;
    }
    if let Some(&limit) = matches.get_one::<usize>("max-suggestions") {
        policy.max_suggestions = (limit > 0).then_some(limit);
    }
    if matches.get_flag("foreground") {
        policy.directions.foreground = true;
    }
    if matches.get_flag("no-foreground") {
        policy.directions.foreground = false;
    }
    if matches.get_flag("no-background") {
        policy.directions.background = false;
    }
    policy.validate()?;

    if let Some(path) = matches.get_one::<PathBuf>("template") {
        settings.template = Some(path.clone());
    }

    Ok(settings)
}

/// The template named in the settings, or the built-in widget.
pub fn template_from_settings(settings: &Settings) -> Result<Template> {
    Ok(match &settings.template {
        Some(path) => Template::from_file(path)?,
        None => Template::default(),
    })
}
