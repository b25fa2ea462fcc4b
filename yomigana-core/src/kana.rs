//! Character classification for Japanese scripts
//!
//! Block ranges used here:
//! - Hiragana: U+3040..=U+309F
//! - Katakana: U+30A0..=U+30FF (includes the prolonged sound mark ー)
//! - Kanji: CJK Unified Ideographs, Extension A, the compatibility block
//!   and the supplementary-plane extensions (B through H)

/// Offset between a katakana codepoint and its hiragana counterpart
const KATAKANA_TO_HIRAGANA: u32 = 0x60;

/// Check if a character is in the hiragana block
#[inline]
pub fn is_hiragana(ch: char) -> bool {
    matches!(ch, '\u{3040}'..='\u{309F}')
}

/// Check if a character is in the katakana block
#[inline]
pub fn is_katakana(ch: char) -> bool {
    matches!(ch, '\u{30A0}'..='\u{30FF}')
}

/// Check if a character is a CJK ideograph
#[inline]
pub fn is_kanji(ch: char) -> bool {
    matches!(
        ch,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{2A700}'..='\u{2EE5F}'
            | '\u{30000}'..='\u{323AF}'
    )
}

/// True iff `text` is non-empty and every character is hiragana or katakana
pub fn is_only_kana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| is_hiragana(ch) || is_katakana(ch))
}

/// Convert katakana to hiragana, leaving every other character untouched
///
/// Only the letters with a hiragana counterpart (ァ..ヶ and the iteration
/// marks ヽヾ) are mapped; ー, ・ and the small extension letters stay as-is.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{30A1}'..='\u{30F6}' | '\u{30FD}' | '\u{30FE}' => {
                char::from_u32(ch as u32 - KATAKANA_TO_HIRAGANA).unwrap_or(ch)
            }
            _ => ch,
        })
        .collect()
}
