//! Length segmentation at chapter boundaries
//!
//! Chapters are accumulated until the running length would reach the target.
//! At that point the group is closed either just before or just after the
//! crossing chapter, whichever leaves the closed group nearer the target.

use crate::config::SplitConfig;
use crate::types::{Chapter, OutputGroup};

/// Partitions a chapter sequence into groups of roughly `target_length`
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    target_length: usize,
}

impl Segmenter {
    pub fn new(config: &SplitConfig) -> Self {
        Self::with_target(config.target_length)
    }

    pub fn with_target(target_length: usize) -> Self {
        Self { target_length }
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Number of output files a document of `total_length` warrants
    pub fn split_count(&self, total_length: usize) -> usize {
        if total_length < self.target_length {
            1
        } else {
            total_length / self.target_length + 1
        }
    }

    /// Split `chapters` into contiguous groups.
    ///
    /// Flattening the result reproduces `chapters` exactly. A chapter longer
    /// than the target is never cut up, but may share a group with the
    /// chapters before it when that lands nearer the target.
    pub fn segment<'a>(&self, chapters: &'a [Chapter]) -> Vec<OutputGroup<'a>> {
        let target = self.target_length;
        let mut groups = Vec::new();
        let mut start = 0;
        let mut running = 0;

        for (index, chapter) in chapters.iter().enumerate() {
            let length = chapter.length();

            let prospective = running + length;
            if prospective < target {
                running = prospective;
                continue;
            }

            let before = running.abs_diff(target);
            let after = prospective.abs_diff(target);
            if start < index && before < after {
                groups.push(OutputGroup::new(&chapters[start..index]));
                start = index;
                running = length;
            } else {
                groups.push(OutputGroup::new(&chapters[start..=index]));
                start = index + 1;
                running = 0;
            }
        }

        if start < chapters.len() {
            groups.push(OutputGroup::new(&chapters[start..]));
        }

        groups
    }
}
