//! Error types for chapsplit-core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the splitting pipeline.
///
/// Ordinary outcomes such as "not a heading", "fallback taken" or
/// "file already merged away" are values, not errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading, parsing or validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A heading rule whose pattern does not compile
    #[error("Invalid heading rule '{name}': {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// I/O failure on a specific file
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for chapsplit-core operations
pub type Result<T> = std::result::Result<T, Error>;
