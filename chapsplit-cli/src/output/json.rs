//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use chapsplit_core::DetectedHeading;
use std::io::Write;

/// JSON formatter - outputs headings as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    headings: Vec<DetectedHeading>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headings: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_heading(&mut self, heading: &DetectedHeading) -> Result<()> {
        self.headings.push(heading.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.headings)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
