//! Scan command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::{init_logging, load_classifier};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::load_document;
use crate::output::OutputFormat;

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Document to scan (.json extraction or .txt)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from settings, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Settings file
    #[arg(short, long, value_name = "FILE", env = "CHAPSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Heading rule file replacing the built-in rules
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let settings = CliConfig::load(self.config.as_deref())?;
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&settings.output.default_format, true)
                .map_err(|e| CliError::ConfigError(format!("output.default_format: {e}")))?,
        };

        let classifier = load_classifier(self.rules.as_deref())?;
        let document = load_document(&self.input)?;
        let lines = document.lines();
        let headings = classifier.scan(&lines);
        log::info!(
            "{}: {} headings in {} lines",
            self.input.display(),
            headings.len(),
            lines.len()
        );

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };

        let mut formatter = format.formatter(writer);
        for heading in &headings {
            formatter.format_heading(heading)?;
        }
        formatter.finish()
    }
}
