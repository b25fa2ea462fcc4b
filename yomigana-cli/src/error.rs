//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Input longer than the accepted maximum
    InputTooLarge {
        /// Characters in the input
        chars: usize,
        /// Accepted maximum
        limit: usize,
    },
    /// Configuration error
    ConfigError(String),
    /// No analyzer command was configured
    MissingAnalyzer,
    /// Processing error from the engine
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InputTooLarge { chars, limit } => {
                write!(f, "Input too large: {chars} characters (limit {limit})")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::MissingAnalyzer => write!(
                f,
                "Configuration error: no analyzer command (use --analyzer-cmd or [analyzer] command)"
            ),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
