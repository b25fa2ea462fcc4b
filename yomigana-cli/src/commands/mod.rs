//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use yomigana_core::OutputFormat;

pub mod annotate;
pub mod chunk;
pub mod generate_config;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add furigana to a text file
    Annotate(annotate::AnnotateArgs),

    /// Show how a text would be split for the analyzer
    Chunk(chunk::ChunkArgs),

    /// Write a configuration file with every default spelled out
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available ruby output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Annotate(args) => args.execute(),
            Commands::Chunk(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    fn execute(&self) {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                for format in OutputFormat::ALL {
                    println!("  {:<8} {}", format.name(), format.description());
                }
            }
        }
    }
}
