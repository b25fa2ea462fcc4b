//! Offset-safe text patching
//!
//! Replacement spans are expressed in character offsets of the original
//! text. They are applied from the rightmost span to the leftmost, so a
//! replacement of a different length never shifts a span still waiting to
//! be applied.

use crate::error::{CoreError, Result};
use std::iter;

/// A replacement of `start..end` (character offsets) with new text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplacementSpan {
    /// First replaced character
    pub start: usize,
    /// One past the last replaced character
    pub end: usize,
    /// Text inserted in place of `start..end`
    pub replacement: String,
}

impl ReplacementSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Number of characters the replacement adds (or removes, if negative)
    pub fn growth(&self) -> isize {
        self.replacement.chars().count() as isize - (self.end - self.start) as isize
    }
}

/// Apply non-overlapping spans to `text`
///
/// Spans may be given in any order. Fails if a span is empty, reaches past
/// the end of the text, or overlaps another span.
pub fn apply_replacements(text: &str, mut spans: Vec<ReplacementSpan>) -> Result<String> {
    if spans.is_empty() {
        return Ok(text.to_string());
    }

    // Byte offset of every character boundary, including the end of text
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(iter::once(text.len()))
        .collect();
    let len = bounds.len() - 1;

    spans.sort_by(|a, b| b.start.cmp(&a.start));

    for span in &spans {
        if span.start >= span.end || span.end > len {
            return Err(CoreError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }
    }
    for pair in spans.windows(2) {
        let (right, left) = (&pair[0], &pair[1]);
        if left.end > right.start {
            return Err(CoreError::OverlappingSpans {
                first_start: left.start,
                second_start: right.start,
            });
        }
    }

    let mut patched = text.to_string();
    for span in &spans {
        patched.replace_range(bounds[span.start]..bounds[span.end], &span.replacement);
    }
    Ok(patched)
}
