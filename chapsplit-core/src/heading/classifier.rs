//! Rule-based chapter heading classifier

use super::config::RuleSetConfig;
use super::rules::{HeadingRule, RuleTable};
use super::suppression::ProseFilter;
use crate::error::Result;
use std::path::Path;

/// Lines longer than this (after trimming) are never headings
pub const MAX_HEADING_CHARS: usize = 60;

/// Decides whether a line of text is a chapter heading.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    name: String,
    rules: RuleTable,
    filter: ProseFilter,
}

impl HeadingClassifier {
    /// Classifier with the built-in rule set
    pub fn new() -> Result<Self> {
        Self::from_config(&RuleSetConfig::builtin()?)
    }

    /// Classifier from an external rule file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_config(&RuleSetConfig::from_file(path)?)
    }

    /// Classifier from a parsed rule set
    pub fn from_config(config: &RuleSetConfig) -> Result<Self> {
        Ok(Self {
            name: config.metadata.name.clone(),
            rules: RuleTable::from_config(config)?,
            filter: ProseFilter::from_config(&config.suppression),
        })
    }

    /// Name of the rule set in use
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in priority order
    pub fn rules(&self) -> impl Iterator<Item = &HeadingRule> {
        self.rules.iter()
    }

    /// Name of the rule matching `text`, or `None` if it is not a heading
    pub fn classify(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let length = text.chars().count();
        if length > MAX_HEADING_CHARS {
            return None;
        }

        let rule = self.rules.first_match(text)?;

        if let Some(rejection) = self.filter.check(text, length) {
            log::trace!("'{text}' matched {rule} but was rejected: {rejection}");
            return None;
        }

        Some(rule)
    }

    /// Whether `text` is a heading
    pub fn is_heading(&self, text: &str) -> bool {
        self.classify(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> HeadingClassifier {
        HeadingClassifier::new().unwrap()
    }

    #[test]
    fn test_basic_headings() {
        let c = classifier();
        for title in [
            "第一章 开始",
            "第1章 开始",
            "Chapter 1",
            "CHAPTER 1",
            "1. 第一章",
            "一、开始",
            "序言",
            "前言",
            "第100章 测试",
            "Part 1",
            "Section 2",
            "第一卷",
            "第一回",
        ] {
            assert!(c.is_heading(title), "expected heading: {title}");
        }
    }

    #[test]
    fn test_decorated_and_spaced_headings() {
        let c = classifier();
        for title in [
            "【第一章】 重生",
            "[第一章] 标题",
            "（第一章） 标题",
            "第  一  章 间隔",
            "第 1 章 测试",
            "番外篇：关于主角",
            "附录 A",
            "【二】发展",
            "Chapter One",
            "Part First",
        ] {
            assert!(c.is_heading(title), "expected heading: {title}");
        }
    }

    #[test]
    fn test_rejections() {
        let c = classifier();
        assert_eq!(c.classify("第一章 他走进了房间，看着窗外的风景。"), None);
        assert_eq!(c.classify("第一章写得很好，我很喜欢。"), None);
        assert_eq!(c.classify("Copyright 2023"), None);
        assert_eq!(c.classify("2023年1月1日"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(classifier().classify("  第一章 开始 \t"), Some("ordinal_chapter"));
    }

    #[test]
    fn test_empty_input() {
        let c = classifier();
        assert_eq!(c.classify(""), None);
        assert_eq!(c.classify("   "), None);
    }

    #[test]
    fn test_length_limit() {
        let c = classifier();
        let at_limit = format!("第一章 {}", "标".repeat(MAX_HEADING_CHARS - 4));
        assert_eq!(at_limit.chars().count(), MAX_HEADING_CHARS);
        assert!(c.is_heading(&at_limit));

        let over_limit = format!("{at_limit}题");
        assert_eq!(c.classify(&over_limit), None);
    }

    #[test]
    fn test_custom_rule_set() {
        let config = RuleSetConfig::from_toml_str(
            r#"
[metadata]
name = "scenes"

[[rules]]
name = "scene"
pattern = 'Scene \d+$'
"#,
        )
        .unwrap();
        let c = HeadingClassifier::from_config(&config).unwrap();
        assert_eq!(c.name(), "scenes");
        assert_eq!(c.classify("scene 4"), Some("scene"));
        assert_eq!(c.classify("Chapter 1"), None);
    }
}
