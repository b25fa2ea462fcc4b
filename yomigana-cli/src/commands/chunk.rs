//! Chunk command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{FileReader, MAX_INPUT_CHARS};
use crate::logging;
use crate::output::{self, EmitFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use yomigana_engine::{Chunk, ChunkManager};

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input file (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum characters per chunk
    #[arg(long, value_name = "CHARS")]
    pub max_chunk_chars: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub emit: EmitFormat,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
struct ChunkData<'a> {
    index: usize,
    char_offset: usize,
    chars: usize,
    text: &'a str,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self) -> Result<()> {
        logging::init(self.verbose, false);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let max_chars = self
            .max_chunk_chars
            .unwrap_or(config.chunking.max_chunk_chars);
        let chunker =
            ChunkManager::new(max_chars).map_err(|e| CliError::ConfigError(e.to_string()))?;

        let text = FileReader::read_limited(&self.input, MAX_INPUT_CHARS)?;
        let chunks = chunker.chunk_text(&text);
        log::info!("{} characters in {} chunks", text.chars().count(), chunks.len());

        let mut destination = output::open_destination(self.output.as_deref())?;
        write_chunks(&mut destination, &chunks, self.emit)?;
        destination.flush()?;
        Ok(())
    }
}

fn write_chunks<W: Write + ?Sized>(writer: &mut W, chunks: &[Chunk], emit: EmitFormat) -> Result<()> {
    match emit {
        EmitFormat::Text => {
            for chunk in chunks {
                writeln!(
                    writer,
                    "--- chunk {} @{} ({} chars) ---",
                    chunk.index,
                    chunk.char_offset,
                    chunk.char_len()
                )?;
                writeln!(writer, "{}", chunk.text)?;
            }
        }
        EmitFormat::Json => {
            let data: Vec<ChunkData<'_>> = chunks
                .iter()
                .map(|chunk| ChunkData {
                    index: chunk.index,
                    char_offset: chunk.char_offset,
                    chars: chunk.char_len(),
                    text: &chunk.text,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &data)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
