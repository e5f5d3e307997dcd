//! Validate command implementation

use anyhow::Result;
use chapsplit_core::HeadingClassifier;
use clap::{ArgGroup, Args};
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["rules", "config"])))]
pub struct ValidateArgs {
    /// Heading rule file to validate
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Settings file to validate
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(path) = &self.rules {
            println!("Validating heading rules: {}", path.display());
            match HeadingClassifier::from_file(path) {
                Ok(classifier) => {
                    println!("✓ Rule file is valid!");
                    println!("  Name: {}", classifier.name());
                    println!("  Rules: {}", classifier.rules().count());
                }
                Err(e) => {
                    println!("✗ Rule file is invalid!");
                    println!("  Error: {e}");
                    errors.push(e.to_string());
                }
            }
        }

        if let Some(path) = &self.config {
            println!("Validating settings: {}", path.display());
            match CliConfig::from_file(path) {
                Ok(settings) => {
                    println!("✓ Settings file is valid!");
                    println!("  Target length: {}", settings.split.target_length);
                }
                Err(e) => {
                    println!("✗ Settings file is invalid!");
                    println!("  Error: {e:#}");
                    errors.push(format!("{e:#}"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Validation failed: {}", errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            rules: Some(PathBuf::from("rules.toml")),
            config: None,
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("rules.toml"));
    }

    #[test]
    fn test_validate_valid_rules() {
        let toml_content = r#"
[metadata]
name = "minimal"

[[rules]]
name = "chapter"
pattern = 'Chapter \d+'
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            rules: Some(temp_file.path().to_path_buf()),
            config: None,
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_duplicate_rule_names() {
        let toml_content = r#"
[metadata]
name = "dupes"

[[rules]]
name = "chapter"
pattern = 'Chapter \d+'

[[rules]]
name = "chapter"
pattern = 'Part \d+'
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            rules: Some(temp_file.path().to_path_buf()),
            config: None,
        };

        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_settings() {
        let mut good = NamedTempFile::new().unwrap();
        write!(good, "[split]\ntarget_length = 50000\n").unwrap();
        let args = ValidateArgs {
            rules: None,
            config: Some(good.path().to_path_buf()),
        };
        assert!(args.execute().is_ok());

        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "[split]\ntarget_length = 0\n").unwrap();
        let args = ValidateArgs {
            rules: None,
            config: Some(bad.path().to_path_buf()),
        };
        assert!(args.execute().is_err());
    }
}
