//! Text chunking for size-limited analyzers
//!
//! Chunks never split a grapheme cluster. Within each window the cut is
//! placed after the last sentence terminator if there is one, otherwise
//! after the last whitespace or punctuation mark, otherwise at the window
//! edge. Concatenating the chunks in order reproduces the input exactly.

use crate::error::{EngineError, Result};
use unicode_segmentation::UnicodeSegmentation;

/// A contiguous slice of the input text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// The text content
    pub text: String,
    /// Position in the chunk sequence
    pub index: usize,
    /// Character offset in the original text
    pub char_offset: usize,
}

impl Chunk {
    /// Create a chunk
    pub fn new(text: impl Into<String>, index: usize, char_offset: usize) -> Self {
        Self {
            text: text.into(),
            index,
            char_offset,
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits text into chunks of at most `max_chars` characters
#[derive(Debug, Clone)]
pub struct ChunkManager {
    max_chars: usize,
}

impl ChunkManager {
    /// Create a new chunk manager
    pub fn new(max_chars: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_chunk_chars must be positive".to_string(),
            ));
        }
        Ok(Self { max_chars })
    }

    /// Maximum chunk length in characters
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunk text according to the size limit
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut rest = text;
        let mut char_offset = 0;

        while !rest.is_empty() {
            let cut = self.next_cut(rest);
            let (head, tail) = rest.split_at(cut);

            chunks.push(Chunk::new(head, chunks.len(), char_offset));

            char_offset += head.chars().count();
            rest = tail;
        }

        chunks
    }

    /// Byte offset at which the next chunk of `text` ends
    fn next_cut(&self, text: &str) -> usize {
        let mut chars = 0;
        let mut window_end = 0;
        let mut sentence_cut = None;
        let mut soft_cut = None;

        for (idx, grapheme) in text.grapheme_indices(true) {
            let width = grapheme.chars().count();
            if chars + width > self.max_chars {
                break;
            }
            chars += width;
            window_end = idx + grapheme.len();

            match grapheme.chars().last() {
                Some(ch) if is_sentence_end(ch) => sentence_cut = Some(window_end),
                Some(ch) if is_soft_break(ch) => soft_cut = Some(window_end),
                _ => {}
            }
        }

        if window_end == text.len() {
            return window_end;
        }

        // A single grapheme wider than the window is kept whole
        if window_end == 0 {
            return text.graphemes(true).next().map_or(text.len(), str::len);
        }

        sentence_cut.or(soft_cut).unwrap_or(window_end)
    }
}

/// Split `text` into chunks of at most `max_chars` characters
pub fn split(text: &str, max_chars: usize) -> Result<Vec<Chunk>> {
    Ok(ChunkManager::new(max_chars)?.chunk_text(text))
}

fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？' | '!' | '?' | '\n')
}

fn is_soft_break(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '、' | '，' | ',' | ';' | '；' | ':' | '：' | '」' | '』' | '）' | ')' | '】'
        )
}
