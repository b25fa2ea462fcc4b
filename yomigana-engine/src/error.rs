//! Engine error types
//!
//! Only configuration problems are fatal. Everything that can go wrong
//! while a run is in progress degrades to less annotation and is recorded
//! in the run report instead.

use thiserror::Error;
use yomigana_core::CoreError;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error("core algorithm error: {0}")]
    Core(#[from] CoreError),

    /// Bad or missing configuration, detected before any chunk is processed
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
