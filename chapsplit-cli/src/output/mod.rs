//! Output formatting for detected headings

use anyhow::Result;
use chapsplit_core::DetectedHeading;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single heading
    fn format_heading(&mut self, heading: &DetectedHeading) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One heading per line
    Text,
    /// JSON array of headings
    Json,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    /// Formatter for this format writing to `writer`
    pub fn formatter<'a, W: Write + 'a>(self, writer: W) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}
