//! Okurigana splitting
//!
//! Separates the trailing hiragana of a surface form (the inflectional
//! ending) from its kanji stem so that only the stem carries a reading.
//! Katakana endings are never split off.

use crate::kana::is_hiragana;

/// Result of splitting a surface form against its reading
///
/// Invariant: `kanji_part + okurigana == surface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OkuriganaSplit<'a> {
    /// The surface with the okurigana removed
    pub kanji_part: &'a str,
    /// The reading restricted to `kanji_part`
    pub kanji_reading: &'a str,
    /// Trailing kana left unannotated (empty when no split applies)
    pub okurigana: &'a str,
}

impl<'a> OkuriganaSplit<'a> {
    /// The whole surface annotated with the whole reading
    fn unsplit(surface: &'a str, reading: &'a str) -> Self {
        Self {
            kanji_part: surface,
            kanji_reading: reading,
            okurigana: "",
        }
    }

    /// Whether a trailing kana run was split off
    pub fn is_split(&self) -> bool {
        !self.okurigana.is_empty()
    }
}

/// Split `surface` into kanji stem and okurigana using `reading`
///
/// Falls back to the unsplit form when the reading does not literally end
/// with the surface's trailing hiragana, or when either half of the split
/// would be empty.
pub fn split_okurigana<'a>(surface: &'a str, reading: &'a str) -> OkuriganaSplit<'a> {
    let stem_end = surface
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| is_hiragana(ch))
        .last()
        .map_or(surface.len(), |(idx, _)| idx);

    let (kanji_part, okurigana) = surface.split_at(stem_end);
    if okurigana.is_empty() || kanji_part.is_empty() {
        return OkuriganaSplit::unsplit(surface, reading);
    }

    match reading.strip_suffix(okurigana) {
        Some(kanji_reading) if !kanji_reading.is_empty() => OkuriganaSplit {
            kanji_part,
            kanji_reading,
            okurigana,
        },
        _ => OkuriganaSplit::unsplit(surface, reading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(split: OkuriganaSplit<'a>) -> (&'a str, &'a str, &'a str) {
        (split.kanji_part, split.kanji_reading, split.okurigana)
    }

    #[test]
    fn test_verb_with_okurigana() {
        assert_eq!(parts(split_okurigana("食べる", "たべる")), ("食", "た", "べる"));
        assert_eq!(parts(split_okurigana("走る", "はしる")), ("走", "はし", "る"));
        assert_eq!(
            parts(split_okurigana("取り扱い", "とりあつかい")),
            ("取り扱", "とりあつか", "い")
        );
    }

    #[test]
    fn test_reading_without_shared_suffix() {
        let split = split_okurigana("食べた", "くらった");
        assert_eq!(parts(split), ("食べた", "くらった", ""));
        assert!(!split.is_split());
    }

    #[test]
    fn test_no_trailing_kana() {
        assert_eq!(parts(split_okurigana("漢字", "かんじ")), ("漢字", "かんじ", ""));
        assert_eq!(parts(split_okurigana("お茶", "おちゃ")), ("お茶", "おちゃ", ""));
    }

    #[test]
    fn test_katakana_tail_is_not_okurigana() {
        assert_eq!(
            parts(split_okurigana("鉄パイプ", "てつぱいぷ")),
            ("鉄パイプ", "てつぱいぷ", "")
        );
    }

    #[test]
    fn test_empty_kanji_reading_falls_back() {
        // Reading equals the okurigana: splitting would leave the stem unread
        assert_eq!(parts(split_okurigana("見る", "る")), ("見る", "る", ""));
    }

    #[test]
    fn test_all_hiragana_surface_is_not_split() {
        assert_eq!(parts(split_okurigana("べる", "たべる")), ("べる", "たべる", ""));
    }

    #[test]
    fn test_katakana_reading_does_not_split() {
        assert_eq!(parts(split_okurigana("食べる", "タベル")), ("食べる", "タベル", ""));
    }

    #[test]
    fn test_concatenation_invariant() {
        let cases = [
            ("食べる", "たべる"),
            ("食べた", "くらった"),
            ("見る", "る"),
            ("漢字", "かんじ"),
            ("お菓子", "おかし"),
            ("", ""),
        ];
        for (surface, reading) in cases {
            let split = split_okurigana(surface, reading);
            assert_eq!(format!("{}{}", split.kanji_part, split.okurigana), surface);
        }
    }
}
