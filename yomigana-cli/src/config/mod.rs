//! Configuration module
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values. Every field has a default, so an empty file is valid.

use crate::analyzer::Protocol;
use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use yomigana_core::{GlossBrackets, KanjiTable, OutputFormat};
use yomigana_engine::config::{DEFAULT_MAX_CHUNK_CHARS, DEFAULT_SKIP_RANGE_CHARS};
use yomigana_engine::{AnnotationConfig, PipelineConfig, ReadingScript};

/// Default pause between analyzer calls in milliseconds
pub const DEFAULT_PACE_MS: u64 = 100;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Annotation policy
    #[serde(default)]
    pub annotation: AnnotationSection,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingSection,

    /// Analyzer configuration
    #[serde(default)]
    pub analyzer: AnalyzerSection,
}

/// Annotation-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnnotationSection {
    /// Recency window in output characters (0 = annotate every occurrence)
    pub skip_range: usize,

    /// Skip words made only of common-use kanji
    pub common_kanji_filter: bool,

    /// Ruby output format
    pub format: OutputFormat,

    /// Reading normalisation
    pub reading_script: ReadingScript,

    /// Custom common-kanji list replacing the built-in joyo table
    pub common_kanji_file: Option<PathBuf>,

    /// Brackets for the bracketed gloss format
    pub brackets: GlossBrackets,
}

impl Default for AnnotationSection {
    fn default() -> Self {
        Self {
            skip_range: DEFAULT_SKIP_RANGE_CHARS,
            common_kanji_filter: false,
            format: OutputFormat::default(),
            reading_script: ReadingScript::default(),
            common_kanji_file: None,
            brackets: GlossBrackets::default(),
        }
    }
}

/// Chunking-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkingSection {
    /// Maximum characters sent to the analyzer at once
    pub max_chunk_chars: usize,
}

impl Default for ChunkingSection {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// Analyzer-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerSection {
    /// Shell command run once per chunk
    pub command: Option<String>,

    /// Wire protocol spoken by the command
    pub protocol: Protocol,

    /// Minimum pause between calls in milliseconds
    pub pace_ms: u64,
}

impl Default for AnalyzerSection {
    fn default() -> Self {
        Self {
            command: None,
            protocol: Protocol::default(),
            pace_ms: DEFAULT_PACE_MS,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Build the engine configuration, loading a custom kanji table if configured
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig> {
        let common_kanji = match &self.annotation.common_kanji_file {
            Some(path) => {
                let list = fs::read_to_string(path).with_context(|| {
                    format!("Failed to read common kanji list: {}", path.display())
                })?;
                Arc::new(
                    KanjiTable::from_list(&list)
                        .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?,
                )
            }
            None => KanjiTable::joyo(),
        };

        Ok(PipelineConfig {
            annotation: AnnotationConfig {
                skip_range_chars: self.annotation.skip_range,
                use_common_kanji_filter: self.annotation.common_kanji_filter,
                output_format: self.annotation.format,
                brackets: self.annotation.brackets.clone(),
                reading_script: self.annotation.reading_script,
                common_kanji,
            },
            max_chunk_chars: self.chunking.max_chunk_chars,
        })
    }
}
