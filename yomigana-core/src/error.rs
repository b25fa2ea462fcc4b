//! Core error types

use thiserror::Error;

/// Errors raised by the core algorithms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input that a total operation cannot accept (empty ruby base, bad table entry, ...)
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// A replacement span does not fit inside the text it patches
    #[error("replacement span {start}..{end} out of bounds for text of {len} characters")]
    SpanOutOfBounds {
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
        /// Character length of the patched text
        len: usize,
    },

    /// Two replacement spans cover the same characters
    #[error("replacement spans starting at {first_start} and {second_start} overlap")]
    OverlappingSpans {
        /// Start of the left span
        first_start: usize,
        /// Start of the right span
        second_start: usize,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_input("empty reading");
        assert_eq!(err.to_string(), "invalid input: empty reading");

        let err = CoreError::SpanOutOfBounds {
            start: 3,
            end: 9,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "replacement span 3..9 out of bounds for text of 5 characters"
        );

        let err = CoreError::OverlappingSpans {
            first_start: 0,
            second_start: 2,
        };
        assert!(err.to_string().contains("overlap"));
    }
}
