//! Morphemes reported by an analyzer

/// One morpheme: the literal surface text and its reading
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Text as it appears in the source
    pub surface: String,
    /// Phonetic transcription, normally kana
    pub reading: String,
}

impl Token {
    /// Create a new token
    pub fn new(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
        }
    }

    /// A token is well formed when both fields are non-empty
    pub fn is_well_formed(&self) -> bool {
        !self.surface.is_empty() && !self.reading.is_empty()
    }
}
