//! Chapter heading detection
//!
//! A fixed, ordered rule table decides whether a line looks like a chapter
//! heading; the first matching rule wins. Matched lines that read like prose
//! are then rejected by word-density filters.

pub mod config;
mod classifier;
mod rules;
mod scanner;
mod suppression;

pub use classifier::{HeadingClassifier, MAX_HEADING_CHARS};
pub use config::{RuleConfig, RuleSetConfig, SuppressionConfig};
pub use rules::{HeadingRule, RuleTable};
pub use scanner::DetectedHeading;
pub use suppression::{ProseFilter, Rejection};
