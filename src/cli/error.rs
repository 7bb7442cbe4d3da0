use std::path::PathBuf;

use thiserror::Error;

/// Exit status when every evaluated pair passes.
pub const EXIT_PASS: i32 = 0;
/// Exit status when at least one pair fails.
pub const EXIT_FAIL: i32 = 1;
/// Exit status for usage and input errors.
pub const EXIT_ERROR: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Checker(#[from] contrast_checker::Error),
    #[error("invalid pair '{0}': expected FG/BG or FG/BG/LABEL")]
    InvalidPairArgument(String),
    #[error("could not read color pairs from {source_name}: {error}")]
    InvalidInput {
        source_name: String,
        error: serde_json::Error,
    },
    #[error("could not read '{}': {error}", path.display())]
    UnreadableFile {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "mcp")]
    #[error("MCP server failed: {0}")]
    Server(String),
    #[cfg(not(feature = "mcp"))]
    #[error("this build has no MCP server, rebuild with `--features mcp`")]
    ServerUnavailable,
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "mcp")]
    #[test]
    fn server_failure() {
        let err = CliError::Server("connection closed".into());
        assert_eq!("MCP server failed: connection closed", err.to_string());
    }

    #[cfg(not(feature = "mcp"))]
    #[test]
    fn server_unavailable() {
        assert!(CliError::ServerUnavailable.to_string().contains("--features mcp"));
    }
}
