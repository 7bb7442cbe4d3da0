use thiserror::Error;

/// Errors produced by the contrast checker.
///
/// Per-pair problems (a malformed color, an exhausted suggestion search)
/// never surface through this type during a batch evaluation: the pair or
/// candidate is dropped instead. These variants are what single-color APIs,
/// configuration loading and rendering report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid color '{0}': expected six hex digits like '#1a2b3c'")]
    InvalidColor(String),
    #[error("color conversion failed: {0}")]
    Conversion(String),
    #[error("invalid suggestion policy: {0}")]
    InvalidPolicy(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("failed to read configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
