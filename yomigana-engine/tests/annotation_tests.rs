//! End-to-end tests for chunking and annotation

use yomigana_engine::*;

fn pipeline(skip_range: usize, format: OutputFormat, max_chunk_chars: usize) -> Pipeline {
    Pipeline::builder()
        .skip_range(skip_range)
        .output_format(format)
        .max_chunk_chars(max_chunk_chars)
        .build()
        .unwrap()
}

/// Analyzer that knows a handful of words and finds them in any chunk
fn dictionary_analyzer(
    words: &'static [(&'static str, &'static str)],
) -> impl FnMut(&str) -> std::result::Result<Vec<Token>, AnalyzerError> {
    move |text: &str| -> std::result::Result<Vec<Token>, AnalyzerError> {
        let mut found: Vec<(usize, Token)> = Vec::new();
        for (surface, reading) in words {
            for (idx, _) in text.match_indices(surface) {
                found.push((idx, Token::new(*surface, *reading)));
            }
        }
        found.sort_by_key(|(idx, _)| *idx);
        Ok(found.into_iter().map(|(_, token)| token).collect())
    }
}

const WORDS: &[(&str, &str)] = &[
    ("食べる", "たべる"),
    ("犬", "いぬ"),
    ("走る", "はしる"),
    ("猫", "ねこ"),
    ("が", "が"),
];

#[test]
fn test_annotates_across_chunks() {
    let text = "犬が走る。猫が食べる。犬が走る。";
    let pipeline = pipeline(0, OutputFormat::BracketedGloss, 6);

    let chunks = pipeline.chunk(text);
    assert_eq!(chunks.len(), 3);

    let mut analyzer = dictionary_analyzer(WORDS);
    let result = pipeline.run(text, &mut analyzer).unwrap();
    assert_eq!(
        result.text,
        "犬｟いぬ｠が走｟はし｠る。猫｟ねこ｠が食｟た｠べる。犬｟いぬ｠が走｟はし｠る。"
    );
    assert_eq!(result.report.chunks_total, 3);
    assert_eq!(result.report.chunks_processed, 3);
    assert_eq!(result.report.annotations, 6);
    assert_eq!(result.report.suppressed.kana_only, 3);
}

#[test]
fn test_recency_window_spans_chunks() {
    let text = "犬が走る。猫が食べる。犬が走る。";
    let pipeline = pipeline(40, OutputFormat::BracketedGloss, 6);

    let mut analyzer = dictionary_analyzer(WORDS);
    let result = pipeline.run(text, &mut analyzer).unwrap();
    assert_eq!(
        result.text,
        "犬｟いぬ｠が走｟はし｠る。猫｟ねこ｠が食｟た｠べる。犬が走る。"
    );
    assert_eq!(result.report.suppressed.recently_seen, 2);
}

#[test]
fn test_xhtml_end_to_end() {
    let pipeline = pipeline(0, OutputFormat::XhtmlRuby, 1000);
    let mut analyzer = PrecomputedTokens::new(vec![vec![
        Token::new("食べる", "たべる"),
        Token::new("犬", "いぬ"),
        Token::new("走る", "はしる"),
    ]]);

    let result = pipeline.run("食べる犬が走る", &mut analyzer).unwrap();
    assert_eq!(
        result.text,
        "<ruby>食<rt>た</rt></ruby>べる<ruby>犬<rt>いぬ</rt></ruby>が<ruby>走<rt>はし</rt></ruby>る"
    );
}

#[test]
fn test_driving_annotator_by_hand() {
    let pipeline = pipeline(0, OutputFormat::BracketedGloss, 3);
    let chunks = pipeline.chunk("犬猫犬猫");
    assert_eq!(chunks.len(), 2);

    let mut annotator = pipeline.annotator().unwrap();
    let mut analyzer = dictionary_analyzer(WORDS);
    for chunk in &chunks {
        let outcome = annotator.process_chunk(chunk, &mut analyzer);
        assert!(matches!(outcome, ChunkOutcome::Annotated(_)));
    }
    let result = annotator.finish();
    assert_eq!(result.text, "犬｟いぬ｠猫｟ねこ｠犬｟いぬ｠猫｟ねこ｠");
}

#[test]
fn test_invalid_configuration_fails_before_work() {
    let mut calls = 0;
    let mut analyzer = |_: &str| -> std::result::Result<Vec<Token>, AnalyzerError> {
        calls += 1;
        Ok(Vec::new())
    };

    let result = Pipeline::builder()
        .max_chunk_chars(0)
        .build()
        .and_then(|pipeline| pipeline.run("犬", &mut analyzer));
    assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    assert_eq!(calls, 0);
}
