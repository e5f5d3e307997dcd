//! Chapter assembly
//!
//! Chapters come either from navigation metadata, filtered through the
//! heading classifier and resolved against content units, or, when that
//! result fails the quality gate, from scanning the flat text for headings.

pub mod gate;
mod navigation;

pub use gate::{FallbackReason, GateDecision};
pub use navigation::{normalize_lines, ContentUnit, Document, NavEntry};

use crate::config::SplitConfig;
use crate::heading::HeadingClassifier;
use crate::types::{lines_length, Chapter};
use std::collections::HashMap;
use std::fmt;

/// Title of the single chapter produced when no headings are found
pub const WHOLE_DOCUMENT_TITLE: &str = "Full Text";

/// Which path produced the chapter sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// Navigation metadata passed the quality gate
    Navigation,
    /// Headings detected by scanning the text
    Scan,
    /// No headings at all; one chapter holds everything
    WholeDocument,
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionPath::Navigation => write!(f, "navigation"),
            ExtractionPath::Scan => write!(f, "heading scan"),
            ExtractionPath::WholeDocument => write!(f, "whole document"),
        }
    }
}

/// Chapters of a document and how they were found
#[derive(Debug, Clone)]
pub struct Extraction {
    pub chapters: Vec<Chapter>,
    pub path: ExtractionPath,
}

/// Builds chapter sequences from documents
#[derive(Debug, Clone, Copy)]
pub struct ChapterAssembler<'a> {
    classifier: &'a HeadingClassifier,
    config: &'a SplitConfig,
}

impl<'a> ChapterAssembler<'a> {
    pub fn new(classifier: &'a HeadingClassifier, config: &'a SplitConfig) -> Self {
        Self { classifier, config }
    }

    /// Chapters from navigation entries whose titles are headings.
    ///
    /// Stub units fold into the previous chapter, and a unit is never the
    /// start of two chapters.
    pub fn from_navigation(&self, document: &Document) -> Vec<Chapter> {
        let mut chapters: Vec<Chapter> = Vec::new();
        // unit index -> chapter that consumed it
        let mut consumed: HashMap<usize, usize> = HashMap::new();

        for entry in document.navigation_entries() {
            let title = entry.title.trim();
            if self.classifier.classify(title).is_none() {
                log::debug!("Navigation entry '{title}' is not a chapter heading, skipping");
                continue;
            }

            let Some(unit_index) = document.resolve(&entry.locator) else {
                log::warn!(
                    "Cannot resolve navigation locator '{}' (title: {title})",
                    entry.locator
                );
                continue;
            };

            let unit = &document.units[unit_index];
            if unit.lines.is_empty() {
                log::debug!("Unit '{}' for '{title}' has no text, skipping", unit.id);
                continue;
            }

            if let Some(&owner) = consumed.get(&unit_index) {
                if owner + 1 == chapters.len() {
                    chapters[owner].content.extend(unit.lines.iter().cloned());
                } else {
                    log::debug!(
                        "Unit '{}' already belongs to chapter '{}', skipping '{title}'",
                        unit.id,
                        chapters[owner].title
                    );
                }
                continue;
            }

            let is_stub = self
                .config
                .is_stub(unit.lines.len(), lines_length(&unit.lines));
            if is_stub && !chapters.is_empty() {
                let previous = chapters.len() - 1;
                log::debug!(
                    "Unit '{}' for '{title}' is a stub, folding into '{}'",
                    unit.id,
                    chapters[previous].title
                );
                chapters[previous].content.extend(unit.lines.iter().cloned());
            } else {
                chapters.push(Chapter::new(title, unit.lines.clone()));
            }
            consumed.insert(unit_index, chapters.len() - 1);
        }

        chapters
    }

    /// Chapters delimited by the headings found in `lines`.
    ///
    /// Lines before the first heading belong to no chapter. Returns an empty
    /// sequence when no heading is found.
    pub fn from_scan<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Chapter> {
        let headings = self.classifier.scan(lines);
        let ends = headings
            .iter()
            .skip(1)
            .map(|heading| heading.index)
            .chain(std::iter::once(lines.len()));

        headings
            .iter()
            .zip(ends)
            .map(|(heading, end)| {
                let content = lines[heading.index + 1..end]
                    .iter()
                    .map(|line| line.as_ref().to_string())
                    .collect();
                Chapter::new(heading.title.clone(), content)
            })
            .collect()
    }

    /// Chapters of `document`, falling back from navigation to scanning to a
    /// single whole-document chapter
    pub fn extract(&self, document: &Document) -> Extraction {
        if !document.navigation.is_empty() {
            let chapters = self.from_navigation(document);
            match gate::evaluate(&chapters, self.config) {
                GateDecision::Accept => {
                    return Extraction {
                        chapters,
                        path: ExtractionPath::Navigation,
                    }
                }
                GateDecision::Fallback(reason) => {
                    log::warn!("Navigation chapters rejected ({reason}), scanning text for headings");
                }
            }
        }

        let lines = document.lines();
        let chapters = self.from_scan(&lines);
        if !chapters.is_empty() {
            return Extraction {
                chapters,
                path: ExtractionPath::Scan,
            };
        }

        log::warn!("No chapter headings found, treating the document as one chapter");
        Extraction {
            chapters: vec![Chapter::new(
                WHOLE_DOCUMENT_TITLE,
                lines.iter().map(|line| line.to_string()).collect(),
            )],
            path: ExtractionPath::WholeDocument,
        }
    }
}
