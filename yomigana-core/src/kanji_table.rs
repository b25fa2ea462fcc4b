//! Reference tables of "common-use" kanji
//!
//! The built-in table is the joyo list (2,136 characters), shipped as
//! `data/joyo.txt`. Custom tables can be loaded from any text list of
//! kanji; whitespace between entries is ignored.

use crate::error::{CoreError, Result};
use crate::kana::is_kanji;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

const JOYO_SOURCE: &str = include_str!("../data/joyo.txt");

static JOYO: OnceLock<Arc<KanjiTable>> = OnceLock::new();

/// A fixed set of kanji treated as common enough to skip annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiTable {
    chars: HashSet<char>,
}

impl KanjiTable {
    /// Build a table from a list of kanji
    ///
    /// Fails with [`CoreError::InvalidInput`] if the list contains anything
    /// other than kanji and whitespace.
    pub fn from_list(list: &str) -> Result<Self> {
        let mut chars = HashSet::new();
        for (position, ch) in list.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            if !is_kanji(ch) {
                return Err(CoreError::invalid_input(format!(
                    "'{ch}' at position {position} is not a kanji"
                )));
            }
            chars.insert(ch);
        }
        Ok(Self { chars })
    }

    /// The built-in joyo kanji table
    pub fn joyo() -> Arc<KanjiTable> {
        JOYO.get_or_init(|| {
            let chars = JOYO_SOURCE.chars().filter(|ch| is_kanji(*ch)).collect();
            Arc::new(KanjiTable { chars })
        })
        .clone()
    }

    /// Check whether a single character is in the table
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// True iff `text` is non-empty and every character is a kanji in this table
    pub fn contains_only(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|ch| is_kanji(ch) && self.contains(ch))
    }

    /// Number of kanji in the table
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// True iff `text` consists solely of joyo kanji
pub fn is_only_common_kanji(text: &str) -> bool {
    KanjiTable::joyo().contains_only(text)
}
