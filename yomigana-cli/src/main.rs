//! yomigana command-line entry point

use anyhow::Result;
use clap::Parser;
use yomigana_cli::commands::Commands;

/// Add furigana (ruby annotations) to Japanese text
#[derive(Debug, Parser)]
#[command(name = "yomigana", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
