//! chapsplit - split book-length documents at chapter boundaries

use std::process::ExitCode;

use chapsplit_cli::commands::Commands;
use clap::Parser;

#[derive(Parser)]
#[command(name = "chapsplit")]
#[command(version, about = "Split book-length documents into balanced parts at chapter boundaries", long_about = None)]
#[command(after_help = "EXAMPLES:
    chapsplit split -i book.json                  Split next to the input
    chapsplit split -i books/ -o out/ --parallel  Split a whole directory
    chapsplit scan -i book.txt -f markdown        Show detected headings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
