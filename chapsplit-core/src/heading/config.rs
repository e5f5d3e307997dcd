//! TOML schema for heading rule files

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Built-in rule file, compiled into the binary
pub const BUILTIN_RULES: &str = include_str!("../../configs/headings.toml");

/// Root of a heading rule file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetConfig {
    pub metadata: Metadata,
    /// Named pattern pieces, referenced from rules as `${name}`
    #[serde(default)]
    pub fragments: BTreeMap<String, String>,
    /// Rules in priority order
    pub rules: Vec<RuleConfig>,
    /// Falls back to the built-in word lists when the section is absent
    #[serde(default = "builtin_suppression")]
    pub suppression: SuppressionConfig,
}

/// Rule set metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One rule table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
}

/// Word lists for the prose filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppressionConfig {
    #[serde(default)]
    pub terminal_marks: Vec<char>,
    #[serde(default)]
    pub function_words: Vec<String>,
    #[serde(default)]
    pub action_verbs: Vec<String>,
    #[serde(default)]
    pub intensity_modifiers: Vec<String>,
    #[serde(default)]
    pub structural_particles: Vec<String>,
}

/// The `[suppression]` section of [`BUILTIN_RULES`]
fn builtin_suppression() -> SuppressionConfig {
    #[derive(Deserialize)]
    struct Section {
        suppression: SuppressionConfig,
    }

    match toml::from_str::<Section>(BUILTIN_RULES) {
        Ok(section) => section.suppression,
        Err(e) => {
            log::error!("Built-in suppression lists are unreadable: {e}");
            SuppressionConfig::default()
        }
    }
}

impl RuleSetConfig {
    /// The built-in rule set
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_RULES)
            .map_err(|e| Error::Configuration(format!("Built-in heading rules: {e}")))
    }

    /// Parse and validate a rule set from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RuleSetConfig = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a rule set from an external file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read file '{}': {}", path.display(), e))
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.metadata.name.trim().is_empty() {
            return Err(Error::Configuration("Rule set name is empty".to_string()));
        }

        if self.rules.is_empty() {
            return Err(Error::Configuration("No heading rules defined".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(Error::Configuration("Rule with empty name".to_string()));
            }
            if rule.pattern.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "Rule '{}' has an empty pattern",
                    rule.name
                )));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "Duplicate rule name '{}'",
                    rule.name
                )));
            }
        }

        Ok(())
    }

    /// Expand `${fragment}` references in a rule pattern
    pub(crate) fn expand(&self, rule: &RuleConfig) -> Result<String> {
        let mut pattern = rule.pattern.clone();
        for (name, value) in &self.fragments {
            pattern = pattern.replace(&format!("${{{name}}}"), value);
        }

        if let Some(start) = pattern.find("${") {
            let reference: String = pattern[start..].chars().take_while(|&c| c != '}').collect();
            return Err(Error::Configuration(format!(
                "Rule '{}' references unknown fragment {}}}",
                rule.name, reference
            )));
        }

        Ok(pattern)
    }
}
