//! JSON output

use super::OutputWriter;
use anyhow::Result;
use std::io::Write;
use yomigana_engine::Annotated;

/// Writes the annotated text together with its run report
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    /// Create a new JSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_annotated(&mut self, annotated: &Annotated) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, annotated)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
