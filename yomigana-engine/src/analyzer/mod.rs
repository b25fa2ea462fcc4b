//! Morphological analyzer boundary
//!
//! The engine never tokenizes text itself. An [`Analyzer`] is called once
//! per chunk, in chunk order, and returns the tokens it found. Every
//! failure is reported as an [`AnalyzerError`] and handled by the pipeline
//! without losing text.

#[cfg(feature = "jlp")]
pub mod jlp;
pub mod tsv;

use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use yomigana_core::Token;

/// Default minimum spacing between analyzer calls
pub const DEFAULT_PACE: Duration = Duration::from_millis(100);

/// Why an analyzer produced no usable tokens for a chunk
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// The service could not analyze this chunk; the chunk passes through
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),

    /// The analyzer answered with tokens that cannot be used; the chunk passes through
    #[error("malformed analyzer response: {0}")]
    Malformed(String),

    /// The host cancelled the run; remaining chunks pass through unanalyzed
    #[error("analysis aborted: {0}")]
    Aborted(String),
}

/// Source of tokens for one chunk of text
pub trait Analyzer {
    /// Analyze `text` and return its tokens in left-to-right order
    fn analyze(&mut self, text: &str) -> Result<Vec<Token>, AnalyzerError>;
}

impl<F> Analyzer for F
where
    F: FnMut(&str) -> Result<Vec<Token>, AnalyzerError>,
{
    fn analyze(&mut self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        self(text)
    }
}

/// Tokens prepared ahead of time, one list per chunk
///
/// The n-th call returns the n-th list; calls past the end return no tokens.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTokens {
    by_chunk: Vec<Vec<Token>>,
    next: usize,
}

impl PrecomputedTokens {
    /// Create from per-chunk token lists
    pub fn new(by_chunk: Vec<Vec<Token>>) -> Self {
        Self { by_chunk, next: 0 }
    }
}

impl Analyzer for PrecomputedTokens {
    fn analyze(&mut self, _text: &str) -> Result<Vec<Token>, AnalyzerError> {
        let tokens = self.by_chunk.get(self.next).cloned().unwrap_or_default();
        self.next += 1;
        Ok(tokens)
    }
}

/// Enforces a minimum interval between consecutive calls to the inner analyzer
#[derive(Debug)]
pub struct Paced<A> {
    inner: A,
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl<A: Analyzer> Paced<A> {
    /// Wrap `inner`, spacing calls at least `min_interval` apart
    pub fn new(inner: A, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_call: None,
        }
    }

    /// Wrap `inner` with the default pacing
    pub fn with_default_pace(inner: A) -> Self {
        Self::new(inner, DEFAULT_PACE)
    }

    /// Unwrap the inner analyzer
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Analyzer> Analyzer for Paced<A> {
    fn analyze(&mut self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        let result = self.inner.analyze(text);
        self.last_call = Some(Instant::now());
        result
    }
}
