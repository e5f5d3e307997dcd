//! Core data types: chapters, output groups and the length measure

use serde::{Deserialize, Serialize};

/// Length of a span of text: the number of non-whitespace characters.
///
/// This is the single size unit used throughout ("words" in user-facing
/// output).
pub fn text_length(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Length of a sequence of lines
pub fn lines_length<S: AsRef<str>>(lines: &[S]) -> usize {
    lines.iter().map(|line| text_length(line.as_ref())).sum()
}

/// A titled span of content lines; the atomic unit of segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Heading text
    pub title: String,
    /// Lines between this heading and the next
    pub content: Vec<String>,
}

impl Chapter {
    /// Create a new chapter
    pub fn new(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Content length; the title is not counted
    pub fn length(&self) -> usize {
        lines_length(&self.content)
    }
}

/// Total content length of a chapter sequence
pub fn total_length(chapters: &[Chapter]) -> usize {
    chapters.iter().map(Chapter::length).sum()
}

/// A contiguous run of chapters materialised as one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputGroup<'a> {
    /// The chapters in this group, in read order
    pub chapters: &'a [Chapter],
    /// Summed content length of `chapters`
    pub length: usize,
}

impl<'a> OutputGroup<'a> {
    pub(crate) fn new(chapters: &'a [Chapter]) -> Self {
        Self {
            chapters,
            length: total_length(chapters),
        }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_skips_whitespace() {
        assert_eq!(text_length("这是一个测试文本。This is a test text. 123456"), 31);
        assert_eq!(text_length(" \t\n"), 0);
        assert_eq!(text_length(""), 0);
    }

    #[test]
    fn test_text_length_counts_fullwidth_space_as_whitespace() {
        assert_eq!(text_length("第一章\u{3000}开始"), 5);
    }

    #[test]
    fn test_chapter_length_excludes_title() {
        let chapter = Chapter::new(
            "第一章 很长的标题",
            vec!["abc".to_string(), "d e".to_string()],
        );
        assert_eq!(chapter.length(), 5);
    }

    #[test]
    fn test_output_group_length() {
        let chapters = vec![
            Chapter::new("a", vec!["xx".into()]),
            Chapter::new("b", vec!["yyy".into()]),
        ];
        let group = OutputGroup::new(&chapters);
        assert_eq!(group.length, 5);
        assert_eq!(group.len(), 2);
        assert!(!group.is_empty());
    }
}
