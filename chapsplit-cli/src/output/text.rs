//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use chapsplit_core::DetectedHeading;
use std::io::Write;

/// Plain text formatter - one heading per line with its 1-based line number
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_heading(&mut self, heading: &DetectedHeading) -> Result<()> {
        writeln!(
            self.writer,
            "{:>6}  {}  [{}]",
            heading.index + 1,
            heading.title,
            heading.rule
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
