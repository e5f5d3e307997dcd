//! Error handling for the CLI application

use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific failures; everything else travels as `anyhow::Error`
#[derive(Debug, Error)]
pub enum CliError {
    /// Nothing to process
    #[error("No input documents found matching: {0}")]
    NoInput(String),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Two documents would write to the same output names
    #[error("Output for {} collides with {}", .input.display(), .other.display())]
    OutputCollision { input: PathBuf, other: PathBuf },

    /// Writing the output would replace the input document
    #[error("Output would overwrite input {}; use --output-dir", .0.display())]
    OverwritesInput(PathBuf),

    /// Some documents in a batch failed
    #[error("{failed} of {total} documents failed")]
    BatchFailed { failed: usize, total: usize },
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_display() {
        let error = CliError::NoInput("*.epub.json".to_string());
        assert_eq!(
            error.to_string(),
            "No input documents found matching: *.epub.json"
        );
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_collision_display() {
        let error = CliError::OutputCollision {
            input: PathBuf::from("b/book.json"),
            other: PathBuf::from("a/book.txt"),
        };
        assert_eq!(
            error.to_string(),
            "Output for b/book.json collides with a/book.txt"
        );
    }

    #[test]
    fn test_error_with_special_characters() {
        let error = CliError::OverwritesInput(PathBuf::from("小说/第一部.txt"));
        assert_eq!(
            error.to_string(),
            "Output would overwrite input 小说/第一部.txt; use --output-dir"
        );
    }

    #[test]
    fn test_cli_result_downcast() {
        let failure: CliResult<()> = Err(CliError::BatchFailed {
            failed: 1,
            total: 3,
        }
        .into());
        let error = failure.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::BatchFailed { failed: 1, total: 3 })
        ));
    }
}
