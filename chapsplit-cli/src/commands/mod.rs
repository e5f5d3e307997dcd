//! CLI command implementations

use anyhow::{Context, Result};
use chapsplit_core::HeadingClassifier;
use clap::Subcommand;
use std::path::Path;

pub mod generate_config;
pub mod list;
pub mod scan;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split documents into length-balanced parts at chapter boundaries
    Split(split::SplitArgs),

    /// Show the chapter headings detected in a document
    Scan(scan::ScanArgs),

    /// Validate a heading rule file or a settings file
    Validate(validate::ValidateArgs),

    /// Write a settings or heading rule template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::Scan(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` takes precedence
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second initialisation (tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Built-in heading rules, or the rule file at `path`
pub(crate) fn load_classifier(path: Option<&Path>) -> Result<HeadingClassifier> {
    match path {
        Some(path) => HeadingClassifier::from_file(path)
            .with_context(|| format!("Failed to load heading rules: {}", path.display())),
        None => HeadingClassifier::new().context("Failed to load built-in heading rules"),
    }
}
