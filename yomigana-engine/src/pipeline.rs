//! Annotation pipeline
//!
//! Chunks are processed strictly in order: the recency window and the
//! cumulative output offset carry over from one chunk to the next. Within
//! a chunk, tokens are matched left to right behind a scan cursor so that
//! two tokens with the same surface never claim the same text.

use crate::analyzer::{Analyzer, AnalyzerError};
use crate::chunker::Chunk;
use crate::config::{AnnotationConfig, ReadingScript};
use crate::error::Result;
use crate::report::{Annotated, Incident, RunReport, Suppression};
use crate::seen::SeenWordWindow;
use log::{debug, trace, warn};
use std::borrow::Cow;
use std::time::Instant;
use yomigana_core::{
    apply_replacements, is_only_kana, katakana_to_hiragana, split_okurigana, ReplacementSpan,
    RubyFormatter, Token,
};

/// What happened to a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The chunk was analyzed; the number of annotations inserted
    Annotated(usize),
    /// Analysis failed; the chunk was written unchanged
    PassedThrough,
    /// The run was cancelled at this chunk
    Aborted,
}

/// Stateful annotator for one run over a sequence of chunks
pub struct Annotator {
    config: AnnotationConfig,
    formatter: RubyFormatter,
    window: SeenWordWindow,
    output: String,
    emitted_chars: usize,
    report: RunReport,
    started: Instant,
}

impl Annotator {
    /// Create an annotator for a fresh run
    pub fn new(config: AnnotationConfig) -> Result<Self> {
        let formatter = config.formatter()?;
        Ok(Self {
            config,
            formatter,
            window: SeenWordWindow::new(),
            output: String::new(),
            emitted_chars: 0,
            report: RunReport::default(),
            started: Instant::now(),
        })
    }

    /// Characters written to the output so far
    pub fn emitted_chars(&self) -> usize {
        self.emitted_chars
    }

    /// Report accumulated so far
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Analyze a chunk and append its annotated text to the output
    pub fn process_chunk<A>(&mut self, chunk: &Chunk, analyzer: &mut A) -> ChunkOutcome
    where
        A: Analyzer + ?Sized,
    {
        match analyzer.analyze(&chunk.text) {
            Ok(tokens) => {
                self.report.chunks_processed += 1;
                self.annotate_tokens(chunk, &tokens)
            }
            Err(AnalyzerError::Aborted(reason)) => {
                self.record(Incident::Aborted {
                    chunk: chunk.index,
                    reason,
                });
                self.report.aborted = true;
                self.pass_through(chunk);
                ChunkOutcome::Aborted
            }
            Err(AnalyzerError::Unavailable(reason)) => {
                self.report.chunks_processed += 1;
                self.record(Incident::CollaboratorUnavailable {
                    chunk: chunk.index,
                    reason,
                });
                self.pass_through(chunk);
                ChunkOutcome::PassedThrough
            }
            Err(AnalyzerError::Malformed(reason)) => {
                self.report.chunks_processed += 1;
                self.record(Incident::MalformedTokens {
                    chunk: chunk.index,
                    reason,
                });
                self.pass_through(chunk);
                ChunkOutcome::PassedThrough
            }
        }
    }

    /// Annotate a chunk with tokens already at hand and append the result
    pub fn annotate_tokens(&mut self, chunk: &Chunk, tokens: &[Token]) -> ChunkOutcome {
        if let Some(position) = tokens.iter().position(|token| !token.is_well_formed()) {
            self.record(Incident::MalformedTokens {
                chunk: chunk.index,
                reason: format!("token {position} has an empty surface or reading"),
            });
            self.pass_through(chunk);
            return ChunkOutcome::PassedThrough;
        }

        let text = chunk.text.as_str();
        let mut spans = Vec::new();
        // Scan cursor, as a byte offset and as a character offset
        let mut cursor = 0;
        let mut cursor_chars = 0;
        // Characters added by spans recorded so far in this chunk
        let mut growth: isize = 0;

        for token in tokens {
            let reading = self.normalize_reading(&token.reading);
            let surface = token.surface.as_str();

            let Some(found) = text[cursor..].find(surface) else {
                self.record(Incident::AlignmentMismatch {
                    chunk: chunk.index,
                    surface: surface.to_string(),
                });
                continue;
            };

            let start_byte = cursor + found;
            let start = cursor_chars + text[cursor..start_byte].chars().count();
            let end = start + surface.chars().count();
            cursor = start_byte + surface.len();
            cursor_chars = end;

            let offset = self.emitted_chars + (start as isize + growth).max(0) as usize;

            if let Some(reason) = self.suppression(surface, &reading, offset) {
                trace!("chunk {}: '{}' suppressed ({:?})", chunk.index, surface, reason);
                self.report.suppressed.record(reason);
                continue;
            }

            let replacement = match self.render(surface, &reading) {
                Ok(replacement) => replacement,
                Err(e) => {
                    warn!("chunk {}: cannot render '{}': {}", chunk.index, surface, e);
                    continue;
                }
            };

            let span = ReplacementSpan::new(start, end, replacement);
            growth += span.growth();
            self.window.mark(surface, offset);
            spans.push(span);
        }

        let annotations = spans.len();
        match apply_replacements(text, spans) {
            Ok(patched) => {
                debug!(
                    "chunk {}: {} tokens, {} annotations",
                    chunk.index,
                    tokens.len(),
                    annotations
                );
                self.emit(&patched);
                self.report.annotations += annotations;
                ChunkOutcome::Annotated(annotations)
            }
            Err(e) => {
                warn!("chunk {}: replacements rejected: {}", chunk.index, e);
                self.emit(text);
                ChunkOutcome::Annotated(0)
            }
        }
    }

    /// Append chunks verbatim, without analysis
    pub fn pass_remaining(&mut self, chunks: &[Chunk]) {
        for chunk in chunks {
            self.pass_through(chunk);
        }
    }

    /// End the run and hand back the output
    pub fn finish(mut self) -> Annotated {
        self.report.processing_time_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        Annotated {
            text: self.output,
            report: self.report,
        }
    }

    /// The first suppression rule that applies to this occurrence, if any
    fn suppression(&self, surface: &str, reading: &str, offset: usize) -> Option<Suppression> {
        if self.config.use_common_kanji_filter && self.config.common_kanji.contains_only(surface) {
            return Some(Suppression::CommonKanji);
        }
        if self
            .window
            .is_recent(surface, offset, self.config.skip_range_chars)
        {
            return Some(Suppression::RecentlySeen);
        }
        if is_only_kana(surface) {
            return Some(Suppression::KanaOnly);
        }
        if surface == reading {
            return Some(Suppression::SameAsReading);
        }
        None
    }

    /// Ruby for a surface, leaving okurigana outside the annotation
    fn render(&self, surface: &str, reading: &str) -> yomigana_core::Result<String> {
        let split = split_okurigana(surface, reading);
        if split.is_split() {
            let ruby = self.formatter.format(split.kanji_part, split.kanji_reading)?;
            Ok(ruby + split.okurigana)
        } else {
            self.formatter.format(surface, reading)
        }
    }

    fn normalize_reading<'a>(&self, reading: &'a str) -> Cow<'a, str> {
        match self.config.reading_script {
            ReadingScript::AsIs => Cow::Borrowed(reading),
            ReadingScript::Hiragana => Cow::Owned(katakana_to_hiragana(reading)),
        }
    }

    fn pass_through(&mut self, chunk: &Chunk) {
        self.report.chunks_passed_through += 1;
        self.emit(&chunk.text);
    }

    fn emit(&mut self, text: &str) {
        self.report.chunks_total += 1;
        self.emitted_chars += text.chars().count();
        self.output.push_str(text);
    }

    fn record(&mut self, incident: Incident) {
        warn!("{}", incident);
        self.report.incidents.push(incident);
    }
}

/// Annotate `chunks` in order, asking `analyzer` for each chunk's tokens
///
/// A cancelled analyzer stops the run; the cancelled chunk and every chunk
/// after it are written unchanged.
pub fn annotate<A>(chunks: &[Chunk], analyzer: &mut A, config: AnnotationConfig) -> Result<Annotated>
where
    A: Analyzer + ?Sized,
{
    let mut annotator = Annotator::new(config)?;

    for (position, chunk) in chunks.iter().enumerate() {
        if annotator.process_chunk(chunk, analyzer) == ChunkOutcome::Aborted {
            annotator.pass_remaining(&chunks[position + 1..]);
            break;
        }
    }

    Ok(annotator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PrecomputedTokens;
    use yomigana_core::{KanjiTable, OutputFormat};

    fn config(skip_range_chars: usize, format: OutputFormat) -> AnnotationConfig {
        AnnotationConfig {
            skip_range_chars,
            output_format: format,
            ..AnnotationConfig::default()
        }
    }

    fn tokens(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs.iter().map(|(s, r)| Token::new(*s, *r)).collect()
    }

    fn run_single(text: &str, pairs: &[(&str, &str)], config: AnnotationConfig) -> Annotated {
        let mut annotator = Annotator::new(config).unwrap();
        annotator.annotate_tokens(&Chunk::new(text, 0, 0), &tokens(pairs));
        annotator.finish()
    }

    #[test]
    fn test_end_to_end_sentence() {
        let result = run_single(
            "食べる犬が走る",
            &[("食べる", "たべる"), ("犬", "いぬ"), ("走る", "はしる")],
            config(0, OutputFormat::XhtmlRuby),
        );
        assert_eq!(
            result.text,
            "<ruby>食<rt>た</rt></ruby>べる<ruby>犬<rt>いぬ</rt></ruby>が<ruby>走<rt>はし</rt></ruby>る"
        );
        assert_eq!(result.report.annotations, 3);
    }

    #[test]
    fn test_kana_only_token_is_suppressed() {
        let result = run_single("これは犬", &[("これ", "これ"), ("は", "は")], config(0, OutputFormat::XhtmlRuby));
        assert_eq!(result.text, "これは犬");
        assert_eq!(result.report.suppressed.kana_only, 2);
        assert_eq!(result.report.annotations, 0);
    }

    #[test]
    fn test_surface_equal_to_reading_is_suppressed() {
        let result = run_single("ABC", &[("ABC", "ABC")], config(0, OutputFormat::XhtmlRuby));
        assert_eq!(result.text, "ABC");
        assert_eq!(result.report.suppressed.same_as_reading, 1);
    }

    #[test]
    fn test_common_kanji_filter() {
        let mut filtered = config(0, OutputFormat::BracketedGloss);
        filtered.use_common_kanji_filter = true;

        let result = run_single("漢字と薔薇", &[("漢字", "かんじ"), ("薔薇", "ばら")], filtered);
        assert_eq!(result.text, "漢字と薔薇｟ばら｠");
        assert_eq!(result.report.suppressed.common_kanji, 1);

        let result = run_single(
            "漢字と薔薇",
            &[("漢字", "かんじ"), ("薔薇", "ばら")],
            config(0, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "漢字｟かんじ｠と薔薇｟ばら｠");
    }

    #[test]
    fn test_custom_common_kanji_table() {
        let mut filtered = config(0, OutputFormat::BracketedGloss);
        filtered.use_common_kanji_filter = true;
        filtered.common_kanji = std::sync::Arc::new(KanjiTable::from_list("薔薇").unwrap());

        let result = run_single("漢字と薔薇", &[("漢字", "かんじ"), ("薔薇", "ばら")], filtered);
        assert_eq!(result.text, "漢字｟かんじ｠と薔薇");
    }

    #[test]
    fn test_recency_window_within_chunk() {
        // 漢字｟かんじ｠ is 7 characters, so the second 漢字 starts at output offset 8
        let result = run_single(
            "漢字と漢字",
            &[("漢字", "かんじ"), ("と", "と"), ("漢字", "かんじ")],
            config(10, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "漢字｟かんじ｠と漢字");
        assert_eq!(result.report.suppressed.recently_seen, 1);

        // Output offset 12: far enough to annotate again
        let result = run_single(
            "漢字とそれから漢字",
            &[("漢字", "かんじ"), ("漢字", "かんじ")],
            config(10, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "漢字｟かんじ｠とそれから漢字｟かんじ｠");
    }

    #[test]
    fn test_recency_window_across_chunks() {
        let chunks = vec![Chunk::new("漢字。", 0, 0), Chunk::new("漢字", 1, 3)];
        let mut analyzer = PrecomputedTokens::new(vec![
            tokens(&[("漢字", "かんじ")]),
            tokens(&[("漢字", "かんじ")]),
        ]);
        let result = annotate(&chunks, &mut analyzer, config(10, OutputFormat::BracketedGloss)).unwrap();
        assert_eq!(result.text, "漢字｟かんじ｠。漢字");

        let mut analyzer = PrecomputedTokens::new(vec![
            tokens(&[("漢字", "かんじ")]),
            tokens(&[("漢字", "かんじ")]),
        ]);
        let result = annotate(&chunks, &mut analyzer, config(8, OutputFormat::BracketedGloss)).unwrap();
        assert_eq!(result.text, "漢字｟かんじ｠。漢字｟かんじ｠");
    }

    #[test]
    fn test_duplicate_surfaces_claim_distinct_positions() {
        let result = run_single(
            "犬と犬",
            &[("犬", "いぬ"), ("犬", "けん")],
            config(0, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "犬｟いぬ｠と犬｟けん｠");
    }

    #[test]
    fn test_alignment_mismatch_skips_token() {
        let result = run_single(
            "犬が走る",
            &[("猫", "ねこ"), ("犬", "いぬ")],
            config(0, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "犬｟いぬ｠が走る");
        assert_eq!(result.report.alignment_mismatches(), 1);
    }

    #[test]
    fn test_token_before_cursor_is_not_reused() {
        // The second 犬 token has nothing left to match after the first claimed it
        let result = run_single(
            "犬が走る",
            &[("犬", "いぬ"), ("走る", "はしる"), ("犬", "いぬ")],
            config(0, OutputFormat::BracketedGloss),
        );
        assert_eq!(result.text, "犬｟いぬ｠が走｟はし｠る");
        assert_eq!(result.report.alignment_mismatches(), 1);
    }

    #[test]
    fn test_malformed_token_passes_chunk_through() {
        let result = run_single(
            "犬が走る",
            &[("犬", "いぬ"), ("走る", "")],
            config(0, OutputFormat::XhtmlRuby),
        );
        assert_eq!(result.text, "犬が走る");
        assert_eq!(result.report.chunks_passed_through, 1);
        assert!(matches!(
            result.report.incidents[0],
            Incident::MalformedTokens { chunk: 0, .. }
        ));
    }

    #[test]
    fn test_hiragana_reading_normalisation() {
        let mut normalised = config(0, OutputFormat::BracketedGloss);
        normalised.reading_script = ReadingScript::Hiragana;
        let result = run_single("食べる", &[("食べる", "タベル")], normalised);
        assert_eq!(result.text, "食｟た｠べる");

        let result = run_single("食べる", &[("食べる", "タベル")], config(0, OutputFormat::BracketedGloss));
        assert_eq!(result.text, "食べる｟タベル｠");
    }

    #[test]
    fn test_unavailable_analyzer_passes_chunk_through() {
        let chunks = vec![Chunk::new("犬", 0, 0), Chunk::new("猫", 1, 1)];
        let mut calls = 0;
        let mut analyzer = |text: &str| -> std::result::Result<Vec<Token>, AnalyzerError> {
            calls += 1;
            if text == "犬" {
                Err(AnalyzerError::Unavailable("quota exceeded".into()))
            } else {
                Ok(vec![Token::new("猫", "ねこ")])
            }
        };
        let result = annotate(&chunks, &mut analyzer, config(0, OutputFormat::BracketedGloss)).unwrap();
        assert_eq!(result.text, "犬猫｟ねこ｠");
        assert_eq!(result.report.chunks_processed, 2);
        assert_eq!(result.report.chunks_passed_through, 1);
        assert!(!result.report.aborted);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_abort_keeps_remaining_text() {
        let chunks = vec![
            Chunk::new("犬。", 0, 0),
            Chunk::new("猫。", 1, 2),
            Chunk::new("鳥。", 2, 4),
        ];
        let mut calls = 0;
        let mut analyzer = |text: &str| -> std::result::Result<Vec<Token>, AnalyzerError> {
            calls += 1;
            match text {
                "犬。" => Ok(vec![Token::new("犬", "いぬ")]),
                _ => Err(AnalyzerError::Aborted("connection lost".into())),
            }
        };
        let result = annotate(&chunks, &mut analyzer, config(0, OutputFormat::BracketedGloss)).unwrap();
        assert_eq!(result.text, "犬｟いぬ｠。猫。鳥。");
        assert!(result.report.aborted);
        assert_eq!(result.report.chunks_total, 3);
        assert_eq!(result.report.chunks_processed, 1);
        assert_eq!(result.report.chunks_passed_through, 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_no_tokens_is_identity() {
        let chunks = vec![Chunk::new("食べる犬が", 0, 0), Chunk::new("走る", 1, 5)];
        let mut analyzer = PrecomputedTokens::default();
        let result = annotate(&chunks, &mut analyzer, AnnotationConfig::default()).unwrap();
        assert_eq!(result.text, "食べる犬が走る");
        assert!(result.report.incidents.is_empty());
        assert_eq!(result.report.chunks_passed_through, 0);
    }
}
