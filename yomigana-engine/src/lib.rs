//! Furigana annotation engine
//!
//! This crate splits text into analyzer-sized chunks, obtains tokens for
//! each chunk from a morphological [`Analyzer`], and rewrites the text with
//! ruby annotations according to an [`AnnotationConfig`].

#![warn(missing_docs)]

pub mod analyzer;
pub mod chunker;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod report;
pub mod seen;

// Re-export key types
pub use analyzer::{Analyzer, AnalyzerError, Paced, PrecomputedTokens};
pub use chunker::{split, Chunk, ChunkManager};
pub use config::{AnnotationConfig, PipelineConfig, ReadingScript};
pub use error::{EngineError, Result};
pub use pipeline::{annotate, Annotator, ChunkOutcome};
pub use processor::{Pipeline, PipelineBuilder};
pub use report::{Annotated, Incident, RunReport, Suppression, SuppressionCounts};
pub use seen::SeenWordWindow;

// Re-export from core for convenience
pub use yomigana_core::{GlossBrackets, KanjiTable, OutputFormat, ReplacementSpan, Token};
