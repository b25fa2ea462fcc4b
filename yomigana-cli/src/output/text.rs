//! Plain text output

use super::OutputWriter;
use anyhow::Result;
use std::io::Write;
use yomigana_engine::Annotated;

/// Writes the annotated text exactly as produced
pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    /// Create a new text writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_annotated(&mut self, annotated: &Annotated) -> Result<()> {
        self.writer.write_all(annotated.text.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yomigana_engine::RunReport;

    #[test]
    fn test_text_is_written_verbatim() {
        let mut buffer = Vec::new();
        {
            let mut writer = TextWriter::new(&mut buffer);
            let annotated = Annotated {
                text: "<ruby>犬<rt>いぬ</rt></ruby>が走る\n".to_string(),
                report: RunReport::default(),
            };
            writer.write_annotated(&annotated).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "<ruby>犬<rt>いぬ</rt></ruby>が走る\n"
        );
    }
}
