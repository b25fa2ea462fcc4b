//! Pipeline entry point and builder

use crate::analyzer::Analyzer;
use crate::chunker::{Chunk, ChunkManager};
use crate::config::{AnnotationConfig, PipelineConfig, ReadingScript};
use crate::error::Result;
use crate::pipeline::{annotate, Annotator};
use crate::report::Annotated;
use std::sync::Arc;
use yomigana_core::{GlossBrackets, KanjiTable, OutputFormat};

/// Chunks text and annotates it with readings from an analyzer
///
/// A `Pipeline` holds only validated configuration; every call to
/// [`Pipeline::run`] starts a fresh run with its own recency window.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    chunker: ChunkManager,
}

impl Pipeline {
    /// Create a pipeline with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let chunker = ChunkManager::new(config.max_chunk_chars)?;
        Ok(Self { config, chunker })
    }

    /// Start building a pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Split text into analyzer-sized chunks
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        self.chunker.chunk_text(text)
    }

    /// Start a run to be driven chunk by chunk
    pub fn annotator(&self) -> Result<Annotator> {
        Annotator::new(self.config.annotation.clone())
    }

    /// Chunk `text` and annotate every chunk in order
    pub fn run<A>(&self, text: &str, analyzer: &mut A) -> Result<Annotated>
    where
        A: Analyzer + ?Sized,
    {
        let chunks = self.chunk(text);
        log::info!(
            "annotating {} characters in {} chunks",
            text.chars().count(),
            chunks.len()
        );
        annotate(&chunks, analyzer, self.config.annotation.clone())
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole annotation policy
    pub fn annotation(mut self, annotation: AnnotationConfig) -> Self {
        self.config.annotation = annotation;
        self
    }

    /// Set the recency window in output characters (0 disables it)
    pub fn skip_range(mut self, chars: usize) -> Self {
        self.config.annotation.skip_range_chars = chars;
        self
    }

    /// Enable or disable the common-kanji filter
    pub fn common_kanji_filter(mut self, enabled: bool) -> Self {
        self.config.annotation.use_common_kanji_filter = enabled;
        self
    }

    /// Use a custom common-kanji table
    pub fn common_kanji(mut self, table: KanjiTable) -> Self {
        self.config.annotation.common_kanji = Arc::new(table);
        self
    }

    /// Set the ruby output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.annotation.output_format = format;
        self
    }

    /// Set the gloss brackets
    pub fn brackets(mut self, brackets: GlossBrackets) -> Self {
        self.config.annotation.brackets = brackets;
        self
    }

    /// Set reading normalisation
    pub fn reading_script(mut self, script: ReadingScript) -> Self {
        self.config.annotation.reading_script = script;
        self
    }

    /// Set the maximum chunk length in characters
    pub fn max_chunk_chars(mut self, chars: usize) -> Self {
        self.config.max_chunk_chars = chars;
        self
    }

    /// Build the pipeline, validating the configuration
    pub fn build(self) -> Result<Pipeline> {
        Pipeline::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PrecomputedTokens;
    use crate::error::EngineError;
    use yomigana_core::Token;

    #[test]
    fn test_builder_settings() {
        let pipeline = Pipeline::builder()
            .skip_range(0)
            .common_kanji_filter(true)
            .output_format(OutputFormat::BracketedGloss)
            .reading_script(ReadingScript::Hiragana)
            .max_chunk_chars(50)
            .build()
            .unwrap();

        let config = pipeline.config();
        assert_eq!(config.max_chunk_chars, 50);
        assert_eq!(config.annotation.skip_range_chars, 0);
        assert!(config.annotation.use_common_kanji_filter);
        assert_eq!(config.annotation.output_format, OutputFormat::BracketedGloss);
        assert_eq!(config.annotation.reading_script, ReadingScript::Hiragana);
    }

    #[test]
    fn test_invalid_chunk_size() {
        let result = Pipeline::builder().max_chunk_chars(0).build();
        assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_run_single_chunk() {
        let pipeline = Pipeline::builder()
            .skip_range(0)
            .output_format(OutputFormat::BracketedGloss)
            .build()
            .unwrap();
        let mut analyzer = PrecomputedTokens::new(vec![vec![
            Token::new("犬", "いぬ"),
            Token::new("走る", "はしる"),
        ]]);

        let result = pipeline.run("犬が走る", &mut analyzer).unwrap();
        assert_eq!(result.text, "犬｟いぬ｠が走｟はし｠る");
        assert_eq!(result.report.chunks_total, 1);
        assert_eq!(result.report.chunks_processed, 1);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let pipeline = Pipeline::builder()
            .skip_range(100)
            .output_format(OutputFormat::BracketedGloss)
            .build()
            .unwrap();

        for _ in 0..2 {
            let mut analyzer = PrecomputedTokens::new(vec![vec![Token::new("犬", "いぬ")]]);
            let result = pipeline.run("犬", &mut analyzer).unwrap();
            assert_eq!(result.text, "犬｟いぬ｠");
        }
    }

    #[test]
    fn test_empty_text() {
        let pipeline = Pipeline::new().unwrap();
        let mut analyzer = PrecomputedTokens::default();
        let result = pipeline.run("", &mut analyzer).unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.report.chunks_total, 0);
    }
}
