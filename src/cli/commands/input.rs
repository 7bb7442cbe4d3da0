//! Where `check` gets its pairs from: arguments, a file or standard input.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use contrast_checker::evaluate::deserialize_pairs;
use contrast_checker::PairInput;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Accepted JSON documents: a bare array of pairs or the tool's
/// `{"color_pairs": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum PairDocument {
    Pairs(#[serde(deserialize_with = "deserialize_pairs")] Vec<PairInput>),
    Envelope {
        #[serde(deserialize_with = "deserialize_pairs")]
        color_pairs: Vec<PairInput>,
    },
}

impl From<PairDocument> for Vec<PairInput> {
    fn from(document: PairDocument) -> Self {
        match document {
            PairDocument::Pairs(pairs) | PairDocument::Envelope { color_pairs: pairs } => pairs,
        }
    }
}

/// Parse a `FG/BG[/LABEL]` argument. The colors themselves are checked
/// later, like any other pair.
pub fn parse_pair_argument(arg: &str) -> Result<PairInput> {
    let mut parts = arg.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(fg), Some(bg), label) if !fg.is_empty() && !bg.is_empty() => {
            Ok(PairInput::new(fg, bg, label.unwrap_or("Unknown")))
        }
        _ => Err(CliError::InvalidPairArgument(arg.to_string())),
    }
}

pub fn parse_pair_document(text: &str, source_name: &str) -> Result<Vec<PairInput>> {
    serde_json::from_str::<PairDocument>(text)
        .map(Vec::from)
        .map_err(|error| CliError::InvalidInput {
            source_name: source_name.to_string(),
            error,
        })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| CliError::UnreadableFile {
        path: path.to_path_buf(),
        error,
    })
}

pub fn read_pairs(matches: &ArgMatches) -> Result<Vec<PairInput>> {
    if let Some(args) = matches.get_many::<String>("pair") {
        return args.map(|arg| parse_pair_argument(arg)).collect();
    }

    match matches.get_one::<PathBuf>("input") {
        Some(path) => parse_pair_document(&read_file(path)?, &path.display().to_string()),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parse_pair_document(&text, "standard input")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_arguments() {
        assert_eq!(
            PairInput::new("777777", "#888888", "body text"),
            parse_pair_argument("777777/#888888/body text").unwrap()
        );
        assert_eq!(
            PairInput::new("#000000", "#ffffff", "Unknown"),
            parse_pair_argument("#000000/#ffffff").unwrap()
        );
        // the label may itself contain slashes
        assert_eq!("a/b", parse_pair_argument("000000/ffffff/a/b").unwrap().element);

        assert!(parse_pair_argument("#000000").is_err());
        assert!(parse_pair_argument("/ffffff").is_err());
        assert!(parse_pair_argument("000000/").is_err());
    }

    #[test]
    fn pair_documents() {
        let pairs = parse_pair_document(
            r##"[{"foreground": "#000000", "background": "#ffffff", "element": "title"}]"##,
            "test",
        )
        .unwrap();
        assert_eq!(vec![PairInput::new("#000000", "#ffffff", "title")], pairs);

        let pairs = parse_pair_document(
            r##"{"color_pairs": [{"foreground": "#000000"}, {"background": "#ffffff"}]}"##,
            "test",
        )
        .unwrap();
        assert_eq!(2, pairs.len());
        assert_eq!("Unknown", pairs[0].element);

        let pairs = parse_pair_document(
            r##"[{"foreground": null, "background": "#ffffff"}, 42, {"foreground": "#000000", "background": "#ffffff"}]"##,
            "test",
        )
        .unwrap();
        assert_eq!(3, pairs.len());
        assert_eq!(PairInput::new("", "", "Unknown"), pairs[1]);
        assert_eq!(PairInput::new("#000000", "#ffffff", "Unknown"), pairs[2]);

        assert!(matches!(
            parse_pair_document("{\"pairs\": 3}", "test"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(parse_pair_document("not json", "test").is_err());
    }
}
