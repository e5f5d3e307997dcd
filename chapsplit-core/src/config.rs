//! Tunable thresholds for segmentation, merging and the quality gate

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Target length of one output file (non-whitespace characters)
    pub const TARGET_LENGTH: usize = 80_000;

    /// Files below this length are always merged into a neighbour
    pub const SMALL_THRESHOLD: usize = 10_000;

    /// Adjacent files whose combined length stays below this are consolidated
    pub const MIN_COMBINED: usize = 100_000;

    /// Content units with fewer lines than this are cover/title stubs
    pub const MIN_CONTENT_LINES: usize = 10;

    /// Content units with fewer characters than this are cover/title stubs
    pub const MIN_CONTENT_CHARS: usize = 100;

    /// Upper bound on merge rounds
    pub const MAX_MERGE_ROUNDS: usize = 100;

    /// Navigation chapters are distrusted when more than this share is short
    pub const MAX_SHORT_RATIO: f64 = 0.5;

    /// Navigation chapters are distrusted when their mean length is below this
    pub const MIN_MEAN_CHARS: usize = 200;
}

/// Splitting configuration
///
/// Passed explicitly into every component; nothing reads global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub target_length: usize,
    pub small_threshold: usize,
    pub min_combined: usize,
    pub min_content_lines: usize,
    pub min_content_chars: usize,
    pub max_merge_rounds: usize,
    pub max_short_ratio: f64,
    pub min_mean_chars: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            target_length: defaults::TARGET_LENGTH,
            small_threshold: defaults::SMALL_THRESHOLD,
            min_combined: defaults::MIN_COMBINED,
            min_content_lines: defaults::MIN_CONTENT_LINES,
            min_content_chars: defaults::MIN_CONTENT_CHARS,
            max_merge_rounds: defaults::MAX_MERGE_ROUNDS,
            max_short_ratio: defaults::MAX_SHORT_RATIO,
            min_mean_chars: defaults::MIN_MEAN_CHARS,
        }
    }
}

impl SplitConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a `SplitConfig` from a TOML document; omitted keys keep defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SplitConfig = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("target_length", self.target_length),
            ("small_threshold", self.small_threshold),
            ("min_combined", self.min_combined),
            ("max_merge_rounds", self.max_merge_rounds),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::Configuration(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if self.small_threshold > self.min_combined {
            return Err(Error::Configuration(format!(
                "small_threshold ({}) must not exceed min_combined ({})",
                self.small_threshold, self.min_combined
            )));
        }

        if !(0.0..=1.0).contains(&self.max_short_ratio) {
            return Err(Error::Configuration(format!(
                "max_short_ratio must be within [0, 1], got {}",
                self.max_short_ratio
            )));
        }

        Ok(())
    }

    /// Whether a span of content is too small to stand as its own chapter
    pub fn is_stub(&self, line_count: usize, length: usize) -> bool {
        line_count < self.min_content_lines || length < self.min_content_chars
    }
}

/// Fluent builder for [`SplitConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Option<SplitConfig>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    fn config(&mut self) -> &mut SplitConfig {
        self.config.get_or_insert_with(SplitConfig::default)
    }

    /// Set the target length of one output file
    pub fn target_length(mut self, length: usize) -> Self {
        self.config().target_length = length;
        self
    }

    /// Set the length below which a file is always merged
    pub fn small_threshold(mut self, length: usize) -> Self {
        self.config().small_threshold = length;
        self
    }

    /// Set the minimum combined length for adjacent files
    pub fn min_combined(mut self, length: usize) -> Self {
        self.config().min_combined = length;
        self
    }

    /// Set the stub thresholds used by chapter assembly
    pub fn min_content(mut self, lines: usize, chars: usize) -> Self {
        let config = self.config();
        config.min_content_lines = lines;
        config.min_content_chars = chars;
        self
    }

    /// Set the merge round safety cap
    pub fn max_merge_rounds(mut self, rounds: usize) -> Self {
        self.config().max_merge_rounds = rounds;
        self
    }

    /// Set the quality gate parameters
    pub fn quality_gate(mut self, max_short_ratio: f64, min_mean_chars: usize) -> Self {
        let config = self.config();
        config.max_short_ratio = max_short_ratio;
        config.min_mean_chars = min_mean_chars;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SplitConfig> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}
