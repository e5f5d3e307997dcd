//! Per-document pipeline: extract chapters, write parts, merge small files

use std::path::{Path, PathBuf};

use crate::assembly::{ChapterAssembler, Document, ExtractionPath};
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::heading::HeadingClassifier;
use crate::merge::{FileStore, MergeObserver, MergeOutcome, Merger};
use crate::render::{part_file_name, render_chapters, single_file_name};
use crate::segment::Segmenter;
use crate::types::{total_length, Chapter};

/// What the pipeline does after extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Segment into parts; when off, every chapter goes to `{base}.txt`
    pub split: bool,
    /// Run the small-file merger over the written parts
    pub merge: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            split: true,
            merge: true,
        }
    }
}

/// Summary of one processed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub extraction: ExtractionPath,
    pub chapters: usize,
    pub total_length: usize,
    /// Parts the total length calls for
    pub split_count: usize,
    /// Files present after the pipeline finished, in reading order
    pub files: Vec<PathBuf>,
    pub merge: Option<MergeOutcome>,
}

/// Where a document's output goes
#[derive(Debug, Clone, Copy)]
pub struct OutputTarget<'a> {
    pub dir: &'a Path,
    pub base_name: &'a str,
}

impl<'a> OutputTarget<'a> {
    pub fn new(dir: &'a Path, base_name: &'a str) -> Self {
        Self { dir, base_name }
    }
}

/// Runs the whole chain for one document at a time
pub struct DocumentSplitter<'a> {
    classifier: &'a HeadingClassifier,
    config: &'a SplitConfig,
    options: SplitOptions,
}

impl<'a> DocumentSplitter<'a> {
    pub fn new(classifier: &'a HeadingClassifier, config: &'a SplitConfig) -> Self {
        Self {
            classifier,
            config,
            options: SplitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SplitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SplitOptions {
        self.options
    }

    /// Extract chapters from `document` and write them under `target`
    pub fn split<S: FileStore>(
        &self,
        document: &Document,
        target: OutputTarget<'_>,
        store: &mut S,
        observer: &mut dyn MergeObserver,
    ) -> Result<SplitReport> {
        let extraction = ChapterAssembler::new(self.classifier, self.config).extract(document);
        log::info!(
            "{}: {} chapters via {}",
            target.base_name,
            extraction.chapters.len(),
            extraction.path
        );

        let mut report = self.write(&extraction.chapters, target, store, observer)?;
        report.extraction = extraction.path;
        Ok(report)
    }

    /// Write an already extracted chapter sequence under `target`
    pub fn write<S: FileStore>(
        &self,
        chapters: &[Chapter],
        target: OutputTarget<'_>,
        store: &mut S,
        observer: &mut dyn MergeObserver,
    ) -> Result<SplitReport> {
        let segmenter = Segmenter::new(self.config);
        let total = total_length(chapters);
        let split_count = segmenter.split_count(total);

        let mut report = SplitReport {
            extraction: ExtractionPath::Scan,
            chapters: chapters.len(),
            total_length: total,
            split_count,
            files: Vec::new(),
            merge: None,
        };

        if !self.options.split || split_count == 1 {
            let path = target.dir.join(single_file_name(target.base_name));
            write_file(store, &path, chapters)?;
            report.files.push(path);
            return Ok(report);
        }

        let groups = segmenter.segment(chapters);
        log::debug!(
            "{}: {} chars in {} groups (expected {})",
            target.base_name,
            total,
            groups.len(),
            split_count
        );

        let mut parts = Vec::with_capacity(groups.len());
        for (index, group) in groups.iter().enumerate() {
            let path = target
                .dir
                .join(part_file_name(target.base_name, index + 1));
            write_file(store, &path, group.chapters)?;
            parts.push(path);
        }

        if self.options.merge && parts.len() > 1 {
            let outcome = Merger::new(&mut *store, self.config).merge(&parts, observer)?;
            report.files = outcome.files.clone();
            report.merge = Some(outcome);
        } else {
            report.files = parts;
        }

        Ok(report)
    }
}

fn write_file<S: FileStore>(store: &mut S, path: &Path, chapters: &[Chapter]) -> Result<()> {
    store
        .write(path, &render_chapters(chapters))
        .map_err(|e| Error::io(path, e))
}
