//! Run reporting: what was annotated, what was skipped and why

use std::fmt;

/// Why a token was left unannotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Made only of common-use kanji while the filter is on
    CommonKanji,
    /// Annotated too recently
    RecentlySeen,
    /// Written entirely in kana
    KanaOnly,
    /// Surface and reading are identical
    SameAsReading,
}

/// Tally of suppressed tokens by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuppressionCounts {
    /// Tokens skipped by the common-kanji filter
    pub common_kanji: usize,
    /// Tokens skipped by the recency window
    pub recently_seen: usize,
    /// Kana-only tokens
    pub kana_only: usize,
    /// Tokens whose reading equals their surface
    pub same_as_reading: usize,
}

impl SuppressionCounts {
    /// Count one suppressed token
    pub fn record(&mut self, reason: Suppression) {
        match reason {
            Suppression::CommonKanji => self.common_kanji += 1,
            Suppression::RecentlySeen => self.recently_seen += 1,
            Suppression::KanaOnly => self.kana_only += 1,
            Suppression::SameAsReading => self.same_as_reading += 1,
        }
    }

    /// Total number of suppressed tokens
    pub fn total(&self) -> usize {
        self.common_kanji + self.recently_seen + self.kana_only + self.same_as_reading
    }
}

/// A recovered problem encountered during a run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Incident {
    /// A token's surface could not be located in its chunk; the token was skipped
    AlignmentMismatch {
        /// Chunk index
        chunk: usize,
        /// The surface that was not found
        surface: String,
    },
    /// The analyzer returned nothing usable; the chunk passed through
    CollaboratorUnavailable {
        /// Chunk index
        chunk: usize,
        /// Reason reported by the analyzer
        reason: String,
    },
    /// The analyzer returned malformed tokens; the chunk passed through
    MalformedTokens {
        /// Chunk index
        chunk: usize,
        /// What was wrong
        reason: String,
    },
    /// The run was cancelled; this and all later chunks passed through
    Aborted {
        /// Chunk index
        chunk: usize,
        /// Reason for cancellation
        reason: String,
    },
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incident::AlignmentMismatch { chunk, surface } => {
                write!(f, "chunk {chunk}: token '{surface}' not found in text")
            }
            Incident::CollaboratorUnavailable { chunk, reason } => {
                write!(f, "chunk {chunk}: analyzer unavailable ({reason})")
            }
            Incident::MalformedTokens { chunk, reason } => {
                write!(f, "chunk {chunk}: malformed tokens ({reason})")
            }
            Incident::Aborted { chunk, reason } => {
                write!(f, "chunk {chunk}: run aborted ({reason})")
            }
        }
    }
}

/// Final status of a run
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Chunks written to the output
    pub chunks_total: usize,
    /// Chunks handed to the analyzer
    pub chunks_processed: usize,
    /// Chunks written verbatim because analysis failed or was cancelled
    pub chunks_passed_through: usize,
    /// Ruby annotations inserted
    pub annotations: usize,
    /// Tokens left unannotated by policy
    pub suppressed: SuppressionCounts,
    /// Recovered problems, in the order they occurred
    pub incidents: Vec<Incident>,
    /// Whether the run stopped early
    pub aborted: bool,
    /// Wall-clock time of the run in milliseconds
    pub processing_time_ms: f64,
}

impl RunReport {
    /// Number of tokens that could not be located in their chunk
    pub fn alignment_mismatches(&self) -> usize {
        self.incidents
            .iter()
            .filter(|incident| matches!(incident, Incident::AlignmentMismatch { .. }))
            .count()
    }
}

/// Annotated text together with its run report
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotated {
    /// The annotated text
    pub text: String,
    /// What happened while producing it
    pub report: RunReport,
}
