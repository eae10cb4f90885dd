use std::path::PathBuf;
use thiserror::Error;

/// The main error type for deckguard operations.
///
/// Rule violations never show up here; validators report them as data.
/// This type covers loading inputs and the CLI exit status.
#[derive(Debug, Error)]
pub enum DeckguardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Failed to parse YAML policy from {path}: {source}")]
    PolicyYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON policy from {path}: {source}")]
    PolicyJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid policy: {}", problems.join("; "))]
    InvalidPolicy { problems: Vec<String> },

    #[error("Invalid color argument: {0}")]
    InvalidColor(#[from] crate::color::ColorError),

    #[error("Design validation failed with {violation_count} violation(s)")]
    ValidationFailed { violation_count: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
