//! Line-oriented token output
//!
//! One token per line, `surface<TAB>reading`. Blank lines and `EOS`
//! markers are skipped. MeCab's default output is accepted too: when the
//! second column is an IPADIC feature list, the reading is its eighth
//! field, and words the dictionary has no reading for are left out.

use super::AnalyzerError;
use yomigana_core::Token;

/// Index of the reading in an IPADIC feature list
const IPADIC_READING_FIELD: usize = 7;

/// Parse analyzer output in the tab-separated line format
pub fn parse_tsv(output: &str) -> Result<Vec<Token>, AnalyzerError> {
    let mut tokens = Vec::new();

    for (line_no, line) in output.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line == "EOS" {
            continue;
        }

        let (surface, rest) = line.split_once('\t').ok_or_else(|| {
            AnalyzerError::Malformed(format!("line {}: missing tab separator", line_no + 1))
        })?;
        let column = rest.split('\t').next().unwrap_or_default();

        let reading = if column.contains(',') {
            match column.split(',').nth(IPADIC_READING_FIELD) {
                Some(reading) if reading != "*" => reading,
                // Unknown word, no reading to offer
                _ => continue,
            }
        } else {
            column
        };

        if surface.is_empty() || reading.is_empty() {
            return Err(AnalyzerError::Malformed(format!(
                "line {}: empty surface or reading",
                line_no + 1
            )));
        }
        tokens.push(Token::new(surface, reading));
    }

    Ok(tokens)
}
