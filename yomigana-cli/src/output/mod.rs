//! Output writing module

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use yomigana_engine::Annotated;

/// Trait for output writers
pub trait OutputWriter {
    /// Write the annotated result
    fn write_annotated(&mut self, annotated: &Annotated) -> Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonWriter;
pub use text::TextWriter;

/// What the annotate command emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EmitFormat {
    /// The annotated text only
    #[default]
    Text,
    /// The annotated text and the run report as JSON
    Json,
}

/// Open the destination: a file when given, stdout otherwise
pub fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Build a writer for `format` over `destination`
pub fn create_writer(format: EmitFormat, destination: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        EmitFormat::Text => Box::new(TextWriter::new(destination)),
        EmitFormat::Json => Box::new(JsonWriter::new(destination)),
    }
}
