//! Configuration types for the engine

use crate::error::{EngineError, Result};
use std::sync::Arc;
use yomigana_core::{GlossBrackets, KanjiTable, OutputFormat, RubyFormatter};

/// Default recency window, in output characters
pub const DEFAULT_SKIP_RANGE_CHARS: usize = 80;

/// Default chunk size, in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1000;

/// How analyzer readings are normalised before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ReadingScript {
    /// Use readings exactly as reported
    #[default]
    AsIs,
    /// Convert katakana readings to hiragana
    Hiragana,
}

/// Per-token annotation policy
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Suppress a repeated word seen fewer than this many output characters ago (0 = never)
    pub skip_range_chars: usize,
    /// Skip words made only of common-use kanji
    pub use_common_kanji_filter: bool,
    /// Ruby syntax to emit
    pub output_format: OutputFormat,
    /// Brackets used by [`OutputFormat::BracketedGloss`]
    pub brackets: GlossBrackets,
    /// Reading normalisation
    pub reading_script: ReadingScript,
    /// Table consulted by the common-kanji filter
    pub common_kanji: Arc<KanjiTable>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            skip_range_chars: DEFAULT_SKIP_RANGE_CHARS,
            use_common_kanji_filter: false,
            output_format: OutputFormat::default(),
            brackets: GlossBrackets::default(),
            reading_script: ReadingScript::default(),
            common_kanji: KanjiTable::joyo(),
        }
    }
}

impl AnnotationConfig {
    /// Annotate every eligible word: no recency window, no common-kanji filter
    pub fn exhaustive() -> Self {
        Self {
            skip_range_chars: 0,
            ..Self::default()
        }
    }

    /// Annotate only uncommon kanji, and each of them sparingly
    pub fn sparse() -> Self {
        Self {
            use_common_kanji_filter: true,
            ..Self::default()
        }
    }

    /// Build the ruby formatter described by this configuration
    pub fn formatter(&self) -> Result<RubyFormatter> {
        RubyFormatter::with_brackets(self.output_format, self.brackets.clone())
            .map_err(|e| EngineError::InvalidConfiguration(e.to_string()))
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Annotation policy
    pub annotation: AnnotationConfig,
    /// Upper bound on chunk length, in characters
    pub max_chunk_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_chars == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_chunk_chars must be positive".to_string(),
            ));
        }
        self.annotation.formatter()?;
        Ok(())
    }
}
