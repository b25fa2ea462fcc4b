//! Recency window for repeated words

use std::collections::HashMap;

/// Remembers where each surface form was last annotated
///
/// Offsets are positions in the cumulative output of a run. One window
/// belongs to exactly one run.
#[derive(Debug, Clone, Default)]
pub struct SeenWordWindow {
    last_annotated: HashMap<String, usize>,
}

impl SeenWordWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `surface` was annotated at output offset `offset`
    pub fn mark(&mut self, surface: &str, offset: usize) {
        match self.last_annotated.get_mut(surface) {
            Some(last) => *last = offset,
            None => {
                self.last_annotated.insert(surface.to_string(), offset);
            }
        }
    }

    /// Output offset of the most recent annotation of `surface`
    pub fn last_offset(&self, surface: &str) -> Option<usize> {
        self.last_annotated.get(surface).copied()
    }

    /// Whether `surface` was annotated fewer than `range` characters before `offset`
    ///
    /// A range of zero disables the window.
    pub fn is_recent(&self, surface: &str, offset: usize, range: usize) -> bool {
        if range == 0 {
            return false;
        }
        self.last_offset(surface)
            .is_some_and(|last| offset.saturating_sub(last) < range)
    }

    /// Number of distinct surfaces annotated so far
    pub fn len(&self) -> usize {
        self.last_annotated.len()
    }

    /// Whether nothing has been annotated yet
    pub fn is_empty(&self) -> bool {
        self.last_annotated.is_empty()
    }
}
