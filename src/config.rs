//! Settings file (`contrast-checker.toml`).
//!
//! ```toml
//! template = "widget.html"
//!
//! [policy]
//! target_ratio = 7.0
//! max_suggestions = 0   # no limit
//!
//! [policy.directions]
//! foreground = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{error::Result, suggest::SuggestionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub policy: SuggestionPolicy,
    /// Custom HTML template, relative paths are resolved against the
    /// directory of the settings file.
    pub template: Option<PathBuf>,
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.policy.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut settings = Self::from_toml_str(&text)?;

        if let (Some(template), Some(dir)) = (&settings.template, path.parent()) {
            if template.is_relative() {
                settings.template = Some(dir.join(template));
            }
        }

        Ok(settings)
    }
}
