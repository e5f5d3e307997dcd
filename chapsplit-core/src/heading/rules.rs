//! Ordered, first-match-wins heading rule table

use super::config::RuleSetConfig;
use crate::error::{Error, Result};
use regex::Regex;

/// One compiled rule
#[derive(Debug, Clone)]
pub struct HeadingRule {
    name: String,
    pattern: Regex,
}

impl HeadingRule {
    /// Compile a rule; the pattern is anchored at the start of the text and
    /// matched case-insensitively
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(&format!("(?i)^(?:{pattern})")).map_err(|source| {
            Error::InvalidRule {
                name: name.clone(),
                source,
            }
        })?;
        Ok(Self { name, pattern })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled pattern, including the added anchor and flags
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[inline]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Rules in fixed priority order; immutable once built
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<HeadingRule>,
}

impl RuleTable {
    /// Compile every rule of a rule set, in file order
    pub fn from_config(config: &RuleSetConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|rule| HeadingRule::new(rule.name.clone(), &config.expand(rule)?))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Name of the first rule matching `text`
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(HeadingRule::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
