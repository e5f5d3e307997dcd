//! Fallback heading detection over a flat sequence of lines

use super::classifier::HeadingClassifier;
use serde::Serialize;

/// A heading found at a line position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedHeading {
    /// Index of the line in the scanned sequence
    pub index: usize,
    /// The trimmed heading text
    pub title: String,
    /// Name of the rule that matched
    pub rule: String,
}

impl HeadingClassifier {
    /// Classify every non-blank line, keeping original positions
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> Vec<DetectedHeading> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let title = line.as_ref().trim();
                if title.is_empty() {
                    return None;
                }
                self.classify(title).map(|rule| DetectedHeading {
                    index,
                    title: title.to_string(),
                    rule: rule.to_string(),
                })
            })
            .collect()
    }
}
