//! Chapter-aware splitting of book-length documents
//!
//! This crate turns a document (navigation metadata plus content units, or
//! plain text) into a handful of output files whose sizes cluster around a
//! target length, cutting only at chapter boundaries.
//!
//! # Pipeline
//!
//! - **Heading classification**: an ordered rule table, first match wins,
//!   followed by prose filters that reject sentence-like matches
//! - **Chapter assembly**: navigation entries filtered and resolved against
//!   content units, with a quality gate falling back to a heading scan
//! - **Segmentation**: greedy grouping toward the target length, choosing
//!   the cut closest to the target at each crossing
//! - **Merging**: fixed-point consolidation of undersized output files
//!
//! Length everywhere means the number of non-whitespace characters.
//!
//! # Example
//!
//! ```rust
//! use chapsplit_core::{Chapter, HeadingClassifier, Segmenter, SplitConfig};
//!
//! let classifier = HeadingClassifier::new().unwrap();
//! assert!(classifier.classify("第一章 开始").is_some());
//! assert!(classifier.classify("Copyright 2023").is_none());
//!
//! let config = SplitConfig::default();
//! let chapters: Vec<Chapter> = (0..5)
//!     .map(|i| Chapter::new(format!("Chapter {}", i + 1), vec!["x".repeat(30_000)]))
//!     .collect();
//! let groups = Segmenter::new(&config).segment(&chapters);
//! let lengths: Vec<usize> = groups.iter().map(|g| g.length).collect();
//! assert_eq!(lengths, vec![90_000, 60_000]);
//! ```

pub mod assembly;
pub mod config;
pub mod error;
pub mod heading;
pub mod merge;
pub mod pipeline;
pub mod render;
pub mod segment;
pub mod types;

pub use assembly::{
    ChapterAssembler, ContentUnit, Document, Extraction, ExtractionPath, NavEntry,
    WHOLE_DOCUMENT_TITLE,
};
pub use config::{ConfigBuilder, SplitConfig};
pub use error::{Error, Result};
pub use heading::{DetectedHeading, HeadingClassifier, RuleSetConfig};
pub use merge::{
    FileStore, FsStore, LogObserver, MemoryStore, MergeEvent, MergeObserver, MergeOutcome,
    Merger,
};
pub use pipeline::{DocumentSplitter, OutputTarget, SplitOptions, SplitReport};
pub use segment::Segmenter;
pub use types::{text_length, Chapter, OutputGroup};
