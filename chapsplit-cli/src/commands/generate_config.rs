//! Generate config command implementation

use anyhow::{bail, Context, Result};
use chapsplit_core::heading::config::BUILTIN_RULES;
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Which template to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    /// Settings file for `--config`
    Settings,
    /// Heading rule file for `--rules`, starting from the built-in rules
    Rules,
}

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Template to generate
    #[arg(short, long, value_enum, default_value = "settings")]
    pub kind: TemplateKind,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                self.output.display()
            );
        }

        let (template, flag) = match self.kind {
            TemplateKind::Settings => (CliConfig::template()?, "--config"),
            TemplateKind::Rules => (BUILTIN_RULES.to_string(), "--rules"),
        };

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Template generated: {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the file");
        println!("2. Validate it:");
        println!("   chapsplit validate {flag} {}", self.output.display());
        println!("3. Use it for splitting:");
        println!(
            "   chapsplit split -i book.json {flag} {}",
            self.output.display()
        );

        Ok(())
    }
}
