//! Split command implementation

use anyhow::Result;
use chapsplit_core::{SplitConfig, SplitOptions};
use clap::Args;
use std::path::PathBuf;

use super::{init_logging, load_classifier};
use crate::batch::{BatchOptions, BatchRunner, BatchSummary, DocumentStatus};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_inputs;
use crate::progress::ProgressReporter;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input documents (.json extraction or .txt), directories or glob patterns
    #[arg(short, long, value_name = "FILE/DIR/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output directory (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Settings file
    #[arg(short, long, value_name = "FILE", env = "CHAPSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Heading rule file replacing the built-in rules
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Target length of each part, in non-whitespace characters
    #[arg(long, value_name = "CHARS")]
    pub target_length: Option<usize>,

    /// Parts shorter than this are merged into a neighbour
    #[arg(long, value_name = "CHARS")]
    pub small_threshold: Option<usize>,

    /// Consecutive parts are combined while their total stays below this
    #[arg(long, value_name = "CHARS")]
    pub min_combined: Option<usize>,

    /// Write each document to a single file
    #[arg(long)]
    pub no_split: bool,

    /// Keep every part as written
    #[arg(long)]
    pub no_merge: bool,

    /// Process documents in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel processing (0 = one per CPU)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Stop starting new documents after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let settings = CliConfig::load(self.config.as_deref())?;
        let config = self.split_config(&settings)?;
        let classifier = load_classifier(self.rules.as_deref())?;
        let inputs = resolve_inputs(&self.input)?;
        log::info!(
            "{} documents, rules '{}', target {} chars",
            inputs.len(),
            classifier.name(),
            config.target_length
        );

        let options = BatchOptions {
            output_dir: self.output_dir.clone(),
            parallel: self.parallel || settings.performance.parallel,
            threads: self.threads.unwrap_or(settings.performance.threads),
            fail_fast: self.fail_fast,
            split: SplitOptions {
                split: settings.output.split && !self.no_split,
                merge: settings.output.merge && !self.no_merge,
            },
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(inputs.len() as u64);
        let summary = BatchRunner::new(&classifier, &config, options).run(&inputs, &progress)?;
        progress.finish();

        if !self.quiet {
            print_summary(&summary);
        }

        match summary.failed() {
            0 => Ok(()),
            failed => Err(CliError::BatchFailed {
                failed,
                total: summary.results.len(),
            }
            .into()),
        }
    }

    /// Settings-file thresholds with command-line overrides applied
    fn split_config(&self, settings: &CliConfig) -> Result<SplitConfig> {
        let mut config = settings.split.clone();
        if let Some(length) = self.target_length {
            config.target_length = length;
        }
        if let Some(length) = self.small_threshold {
            config.small_threshold = length;
        }
        if let Some(length) = self.min_combined {
            config.min_combined = length;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_summary(summary: &BatchSummary) {
    for result in &summary.results {
        if let DocumentStatus::Done(report) = &result.status {
            println!(
                "✓ {} ({} chapters via {}, {} chars)",
                result.input.display(),
                report.chapters,
                report.extraction,
                report.total_length
            );
            for file in &report.files {
                println!("    {}", file.display());
            }
        }
    }

    println!(
        "Processed {} documents: {} succeeded, {} failed, {} skipped, {} files written",
        summary.results.len(),
        summary.succeeded(),
        summary.failed(),
        summary.skipped(),
        summary.files_written()
    );
}
