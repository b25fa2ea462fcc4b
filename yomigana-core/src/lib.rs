//! Core algorithms for furigana annotation
//!
//! This crate holds the pure, I/O-free building blocks used by the
//! annotation engine: character classification, okurigana splitting,
//! ruby formatting and offset-safe text patching.

#![warn(missing_docs)]

pub mod error;
pub mod kana;
pub mod kanji_table;
pub mod okurigana;
pub mod patch;
pub mod ruby;
pub mod token;

// Re-export key types
pub use error::{CoreError, Result};
pub use kana::{is_hiragana, is_kanji, is_katakana, is_only_kana, katakana_to_hiragana};
pub use kanji_table::{is_only_common_kanji, KanjiTable};
pub use okurigana::{split_okurigana, OkuriganaSplit};
pub use patch::{apply_replacements, ReplacementSpan};
pub use ruby::{format_ruby, GlossBrackets, OutputFormat, RubyFormatter};
pub use token::Token;
