//! Settings file for the command-line front end

use anyhow::{Context, Result};
use chapsplit_core::SplitConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Splitting and merging thresholds
    #[serde(default)]
    pub split: SplitConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Segment documents into parts
    pub split: bool,

    /// Merge undersized parts after writing
    pub merge: bool,

    /// Default format of the scan command
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            split: true,
            merge: true,
            default_format: "text".to_string(),
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Process documents in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub threads: usize,
}

impl CliConfig {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config
            .split
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load settings from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Settings from `path`, or defaults when none is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Commented TOML template holding the default values
    pub fn template() -> Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default settings")?;
        Ok(format!(
            "# chapsplit settings\n\
             #\n\
             # Lengths count non-whitespace characters.\n\
             # [split]        thresholds for segmenting and merging\n\
             # [output]       split/merge switches, default scan format\n\
             # [performance]  parallel batch processing (threads = 0 means auto)\n\n\
             {body}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
[split]
target_length = 60000

[performance]
parallel = true
"#,
        )
        .unwrap();

        assert_eq!(config.split.target_length, 60_000);
        assert_eq!(config.split.min_combined, 100_000);
        assert!(config.output.merge);
        assert!(config.performance.parallel);
        assert_eq!(config.performance.threads, 0);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = CliConfig::from_toml_str(
            r#"
[split]
small_threshold = 200000
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(CliConfig::from_toml_str("[output]\ncolour = true\n").is_err());
    }

    #[test]
    fn test_template_round_trips() {
        let template = CliConfig::template().unwrap();
        assert!(template.starts_with("# chapsplit settings"));
        let parsed = CliConfig::from_toml_str(&template).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }
}
