//! Ruby (furigana) rendering
//!
//! Two syntaxes are supported:
//! - XHTML ruby markup: `<ruby>漢字<rt>かんじ</rt></ruby>`
//! - Bracketed gloss: `漢字｟かんじ｠`, with configurable bracket glyphs

use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// Default opening bracket for glosses (U+FF5F FULLWIDTH LEFT WHITE PARENTHESIS)
pub const DEFAULT_GLOSS_OPEN: &str = "｟";
/// Default closing bracket for glosses (U+FF60 FULLWIDTH RIGHT WHITE PARENTHESIS)
pub const DEFAULT_GLOSS_CLOSE: &str = "｠";

/// Annotation syntax for rendered ruby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputFormat {
    /// `<ruby>base<rt>reading</rt></ruby>`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "xhtml"))]
    XhtmlRuby,
    /// `base｟reading｠`
    #[cfg_attr(feature = "serde", serde(rename = "bracket"))]
    BracketedGloss,
}

impl OutputFormat {
    /// All supported formats
    pub const ALL: [OutputFormat; 2] = [OutputFormat::XhtmlRuby, OutputFormat::BracketedGloss];

    /// Short name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::XhtmlRuby => "xhtml",
            OutputFormat::BracketedGloss => "bracket",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::XhtmlRuby => "XHTML ruby markup (<ruby>base<rt>reading</rt></ruby>)",
            OutputFormat::BracketedGloss => "reading in gloss brackets after the base (base｟reading｠)",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xhtml" => Ok(OutputFormat::XhtmlRuby),
            "bracket" => Ok(OutputFormat::BracketedGloss),
            other => Err(CoreError::invalid_input(format!(
                "unknown output format '{other}' (expected 'xhtml' or 'bracket')"
            ))),
        }
    }
}

/// Bracket pair enclosing a gloss reading
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlossBrackets {
    /// Opening glyph(s)
    pub open: String,
    /// Closing glyph(s)
    pub close: String,
}

impl Default for GlossBrackets {
    fn default() -> Self {
        Self {
            open: DEFAULT_GLOSS_OPEN.to_string(),
            close: DEFAULT_GLOSS_CLOSE.to_string(),
        }
    }
}

impl GlossBrackets {
    /// Create a bracket pair, rejecting empty glyphs
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let brackets = Self {
            open: open.into(),
            close: close.into(),
        };
        brackets.validate()?;
        Ok(brackets)
    }

    /// Check that both glyphs are present
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(CoreError::invalid_input("gloss brackets must not be empty"));
        }
        Ok(())
    }
}

/// Renders base/reading pairs in a fixed output format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RubyFormatter {
    format: OutputFormat,
    brackets: GlossBrackets,
}

impl RubyFormatter {
    /// Create a formatter with the default gloss brackets
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            brackets: GlossBrackets::default(),
        }
    }

    /// Create a formatter with custom gloss brackets
    pub fn with_brackets(format: OutputFormat, brackets: GlossBrackets) -> Result<Self> {
        brackets.validate()?;
        Ok(Self { format, brackets })
    }

    /// The configured output format
    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Render `base` annotated with `reading`
    ///
    /// Both must be non-empty; callers filter such pairs out beforehand.
    pub fn format(&self, base: &str, reading: &str) -> Result<String> {
        if base.is_empty() {
            return Err(CoreError::invalid_input("ruby base is empty"));
        }
        if reading.is_empty() {
            return Err(CoreError::invalid_input("ruby reading is empty"));
        }

        Ok(match self.format {
            OutputFormat::XhtmlRuby => format!("<ruby>{base}<rt>{reading}</rt></ruby>"),
            OutputFormat::BracketedGloss => {
                format!("{base}{}{reading}{}", self.brackets.open, self.brackets.close)
            }
        })
    }
}

/// Render `base` annotated with `reading` using the default brackets
pub fn format_ruby(base: &str, reading: &str, format: OutputFormat) -> Result<String> {
    RubyFormatter::new(format).format(base, reading)
}
