//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use chapsplit_core::DetectedHeading;
use std::io::Write;

/// Markdown formatter - outputs headings as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    heading_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            heading_count: 0,
        }
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_heading(&mut self, heading: &DetectedHeading) -> Result<()> {
        if self.heading_count == 0 {
            writeln!(self.writer, "| Line | Heading | Rule |")?;
            writeln!(self.writer, "|-----:|---------|------|")?;
        }
        self.heading_count += 1;
        writeln!(
            self.writer,
            "| {} | {} | `{}` |",
            heading.index + 1,
            heading.title.replace('|', "\\|"),
            heading.rule
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "*Total headings: {}*", self.heading_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
