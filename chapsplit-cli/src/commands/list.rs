//! List command implementation

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

use super::load_classifier;
use crate::output::OutputFormat;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List heading rules in priority order
    Rules {
        /// Heading rule file instead of the built-in rules
        #[arg(short, long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },

    /// List available output formats
    Formats,
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Rules { rules } => {
                let classifier = load_classifier(rules.as_deref())?;
                println!("Heading rules ({}), first match wins:", classifier.name());
                for (position, rule) in classifier.rules().enumerate() {
                    println!("{:>3}. {:<26} {}", position + 1, rule.name(), rule.pattern());
                }
            }
            ListCommands::Formats => {
                println!("Output formats for scan:");
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        println!(
                            "  {:<10} {}",
                            value.get_name(),
                            value.get_help().map(|h| h.to_string()).unwrap_or_default()
                        );
                    }
                }
            }
        }
        Ok(())
    }
}
