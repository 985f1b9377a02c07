//! Error types for notelight

use thiserror::Error;

/// Result type alias for notelight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern for {token}: {pattern}")]
    InvalidPattern {
        token: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown token type: {0}")]
    UnknownToken(String),

    #[error("Malformed rule table: {0}")]
    RuleTable(#[source] toml::de::Error),

    #[error("Malformed configuration: {0}")]
    Config(#[source] toml::de::Error),
}
