//! Error types for keel-core

use std::fmt;
use thiserror::Error;

/// Reason a migration file was rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    /// No `-- Migration Down` marker line
    MissingDownMarker,
    /// More than one `-- Migration Down` marker line
    MultipleDownMarkers(usize),
    /// Nothing left of the Up section after trimming
    EmptyUp,
    /// Nothing left of the Down section after trimming
    EmptyDown,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatIssue::MissingDownMarker => write!(f, "missing '-- Migration Down' marker"),
            FormatIssue::MultipleDownMarkers(n) => {
                write!(f, "expected one '-- Migration Down' marker, found {n}")
            }
            FormatIssue::EmptyUp => write!(f, "up section is empty"),
            FormatIssue::EmptyDown => write!(f, "down section is empty"),
        }
    }
}

/// Core error type for Keel
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Migrations directory or file could not be read
    #[error("[E001] Failed to load migrations from '{path}': {source}")]
    Load {
        path: String,
        source: std::io::Error,
    },

    /// E002: Migration file name is not usable as an ID
    #[error("[E002] Invalid migration file name: {path}")]
    InvalidFileName { path: String },

    /// E003: Migration file content is malformed
    #[error("[E003] Invalid migration '{id}' ({path}): {issue}")]
    Format {
        id: String,
        path: String,
        issue: FormatIssue,
    },

    /// E004: Two files resolve to the same migration ID
    #[error("[E004] Duplicate migration ID '{id}' in {first} and {second}")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    /// E005: Configuration file not found
    #[error("[E005] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E006: Failed to parse configuration file
    #[error("[E006] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E007: Invalid configuration value
    #[error("[E007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E008: IO error with file path context
    #[error("[E008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
