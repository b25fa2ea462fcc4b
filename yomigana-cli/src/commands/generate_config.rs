//! Generate config command implementation

use crate::config::DEFAULT_PACE_MS;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use yomigana_core::ruby::{DEFAULT_GLOSS_CLOSE, DEFAULT_GLOSS_OPEN};
use yomigana_engine::config::{DEFAULT_MAX_CHUNK_CHARS, DEFAULT_SKIP_RANGE_CHARS};

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!();
        println!("Use it with:");
        println!(
            "   yomigana annotate -i input.txt -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Configuration file with every setting at its default
pub fn template() -> String {
    format!(
        r#"# yomigana configuration

[annotation]
# Do not repeat ruby for a word annotated within this many output characters.
# 0 annotates every occurrence.
skip_range = {DEFAULT_SKIP_RANGE_CHARS}

# Leave words written only in common-use (joyo) kanji unannotated
common_kanji_filter = false

# Replace the built-in joyo table with your own list (one kanji per line)
# common_kanji_file = "common.txt"

# "xhtml" for <ruby>base<rt>reading</rt></ruby>, "bracket" for base{DEFAULT_GLOSS_OPEN}reading{DEFAULT_GLOSS_CLOSE}
format = "xhtml"

# "as-is" keeps readings as the analyzer returns them, "hiragana" converts katakana
reading_script = "as-is"

[annotation.brackets]
open = "{DEFAULT_GLOSS_OPEN}"
close = "{DEFAULT_GLOSS_CLOSE}"

[chunking]
# Maximum characters sent to the analyzer in one call
max_chunk_chars = {DEFAULT_MAX_CHUNK_CHARS}

[analyzer]
# Shell command that reads a chunk on stdin and prints its tokens
# command = "mecab"

# "tsv" for surface<TAB>reading lines or MeCab output, "jlp" for JLP JSON-RPC
protocol = "tsv"

# Minimum pause between analyzer calls in milliseconds
pace_ms = {DEFAULT_PACE_MS}
"#
    )
}
