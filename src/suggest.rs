//! Suggest replacement colors for pairs that fail the contrast target.
//!
//! The search only moves OKLCH lightness. Hue and chroma of the adjusted
//! color are kept (up to gamut mapping), so a suggestion stays recognisably
//! the same color. Each direction is a fixed-step walk that stops at the
//! first step clearing the target, which keeps results deterministic and
//! easy to explain.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    helper::{clamp, round_to},
    types::Scalar,
    wcag, Color, OkLch,
};

/// Largest number of steps a policy may walk in one direction.
pub const MAX_STEPS: usize = 1000;

/// Which colors of a pair the engine may adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Directions {
    pub background: bool,
    pub foreground: bool,
}

impl Default for Directions {
    fn default() -> Self {
        Directions {
            background: true,
            foreground: true,
        }
    }
}

/// Parameters of the lightness search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionPolicy {
    pub directions: Directions,
    /// Keep at most this many suggestions per pair, `None` keeps all.
    /// A value of `0` in configuration files means no limit.
    #[serde(deserialize_with = "deserialize_limit")]
    pub max_suggestions: Option<usize>,
    /// Ratio a candidate has to reach.
    pub target_ratio: Scalar,
    /// Lightness change per step.
    pub step: Scalar,
    /// Largest total lightness change explored in each direction.
    pub bound: Scalar,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        SuggestionPolicy {
            directions: Directions::default(),
            max_suggestions: Some(2),
            target_ratio: wcag::AA_NORMAL,
            step: 0.1,
            bound: 0.5,
        }
    }
}

fn deserialize_limit<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<usize>, D::Error> {
    let limit = usize::deserialize(deserializer)?;
    Ok((limit > 0).then_some(limit))
}

impl SuggestionPolicy {
    /// Only walk the background, in both directions, keeping every candidate.
    pub fn background_only() -> Self {
        SuggestionPolicy {
            directions: Directions {
                background: true,
                foreground: false,
            },
            max_suggestions: None,
            ..SuggestionPolicy::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidPolicy(format!(
                "step must be a positive number, got {}",
                self.step
            )));
        }
        if !(self.bound.is_finite() && self.bound >= self.step) {
            return Err(Error::InvalidPolicy(format!(
                "bound must be at least one step ({}), got {}",
                self.step, self.bound
            )));
        }
        if self.steps() > MAX_STEPS {
            return Err(Error::InvalidPolicy(format!(
                "bound {} with step {} walks more than {} steps",
                self.bound, self.step, MAX_STEPS
            )));
        }
        if !(1.0..=21.0).contains(&self.target_ratio) {
            return Err(Error::InvalidPolicy(format!(
                "target ratio must be between 1 and 21, got {}",
                self.target_ratio
            )));
        }
        Ok(())
    }

    /// Number of steps walked in each direction.
    pub fn steps(&self) -> usize {
        // tolerate 0.5 / 0.1 == 4.999...
        (self.bound / self.step + 1e-9).floor() as usize
    }

    /// Adjustments to explore, in exploration order.
    pub fn adjustments(&self) -> impl Iterator<Item = Adjustment> {
        let background = self
            .directions
            .background
            .then_some([Adjustment::LightenBackground, Adjustment::DarkenBackground]);
        let foreground = self
            .directions
            .foreground
            .then_some([Adjustment::LightenForeground, Adjustment::DarkenForeground]);

        background.into_iter().chain(foreground).flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Foreground,
    Background,
}

/// The kind of change a suggestion makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Adjustment {
    #[serde(rename = "lighten_bg")]
    LightenBackground,
    #[serde(rename = "darken_bg")]
    DarkenBackground,
    #[serde(rename = "lighten_fg")]
    LightenForeground,
    #[serde(rename = "darken_fg")]
    DarkenForeground,
}

impl Adjustment {
    fn role(self) -> Role {
        match self {
            Adjustment::LightenBackground | Adjustment::DarkenBackground => Role::Background,
            Adjustment::LightenForeground | Adjustment::DarkenForeground => Role::Foreground,
        }
    }

    fn sign(self) -> Scalar {
        match self {
            Adjustment::LightenBackground | Adjustment::LightenForeground => 1.0,
            Adjustment::DarkenBackground | Adjustment::DarkenForeground => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Adjustment::LightenBackground => "lighten_bg",
            Adjustment::DarkenBackground => "darken_bg",
            Adjustment::LightenForeground => "lighten_fg",
            Adjustment::DarkenForeground => "darken_fg",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Adjustment::LightenBackground => "lighten background",
            Adjustment::DarkenBackground => "darken background",
            Adjustment::LightenForeground => "lighten foreground",
            Adjustment::DarkenForeground => "darken foreground",
        }
    }
}

/// A corrected color pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: Adjustment,
    /// Ratio of the suggested pair, rounded to one decimal place.
    #[serde(rename = "new_contrast_ratio")]
    pub resulting_ratio: Scalar,
    #[serde(rename = "preview_hex_fg")]
    pub foreground: Color,
    #[serde(rename = "preview_hex_bg")]
    pub background: Color,
    pub foreground_oklch: OkLch,
    pub background_oklch: OkLch,
}

struct Candidate {
    kind: Adjustment,
    ratio: Scalar,
    foreground: Color,
    background: Color,
}

impl From<Candidate> for Suggestion {
    fn from(c: Candidate) -> Self {
        Suggestion {
            kind: c.kind,
            resulting_ratio: round_to(c.ratio, 1),
            foreground_oklch: c.foreground.to_oklch(),
            background_oklch: c.background.to_oklch(),
            foreground: c.foreground,
            background: c.background,
        }
    }
}

/// Suggest adjusted pairs that reach `policy.target_ratio`, best ratio first.
///
/// Every returned suggestion improves on the current ratio and reaches the
/// target. Candidates with equal ratios keep exploration order. An empty
/// result means no explored step was good enough.
pub fn suggest(foreground: &Color, background: &Color, policy: &SuggestionPolicy) -> Vec<Suggestion> {
    let current = foreground.contrast_ratio(background);

    let mut candidates: Vec<Candidate> = policy
        .adjustments()
        .filter_map(|kind| walk(foreground, background, kind, current, policy))
        .collect();

    // stable: ties keep exploration order
    candidates.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    if let Some(limit) = policy.max_suggestions {
        candidates.truncate(limit);
    }

    candidates.into_iter().map(Suggestion::from).collect()
}

fn walk(
    foreground: &Color,
    background: &Color,
    kind: Adjustment,
    current: Scalar,
    policy: &SuggestionPolicy,
) -> Option<Candidate> {
    let role = kind.role();
    let start: OkLch = match role {
        Role::Background => background.to_oklch(),
        Role::Foreground => foreground.to_oklch(),
    };

    let mut previous = None;
    for i in 1..=policy.steps() {
        let lightness = clamp(0.0, 1.0, start.l + kind.sign() * policy.step * i as Scalar);
        // pinned at black or white, further steps give the same color
        if previous == Some(lightness) {
            break;
        }
        previous = Some(lightness);

        let adjusted = match start.with_lightness(lightness).to_color() {
            Ok(color) => color,
            Err(err) => {
                debug!(kind = kind.as_str(), step = i, %err, "dropping candidate");
                continue;
            }
        };

        let (fg, bg) = match role {
            Role::Background => (*foreground, adjusted),
            Role::Foreground => (adjusted, *background),
        };
        let ratio = fg.contrast_ratio(&bg);
        if ratio >= policy.target_ratio && ratio > current {
            return Some(Candidate {
                kind,
                ratio,
                foreground: fg,
                background: bg,
            });
        }
    }

    debug!(kind = kind.as_str(), "no step reaches the target");
    None
}
