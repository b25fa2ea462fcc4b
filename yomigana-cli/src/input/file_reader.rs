//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Longest input accepted, in characters
pub const MAX_INPUT_CHARS: usize = 1_000_000;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text; `-` reads standard input
    pub fn read_text(path: &Path) -> Result<String> {
        if path.as_os_str() == "-" {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read standard input")?;
            return Ok(content);
        }

        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read input and reject anything longer than `limit` characters
    pub fn read_limited(path: &Path, limit: usize) -> Result<String> {
        let content = Self::read_text(path)?;
        Self::check_length(&content, limit)?;
        Ok(content)
    }

    /// Fail with [`CliError::InputTooLarge`] when `text` exceeds `limit` characters
    pub fn check_length(text: &str, limit: usize) -> Result<()> {
        let chars = text.chars().count();
        if chars > limit {
            return Err(CliError::InputTooLarge { chars, limit }.into());
        }
        Ok(())
    }
}
