//! Error types for the GA engine.

use thiserror::Error;

/// Errors raised by bit access, chromosome operators, and generation setup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// Bit index outside `[0, len)`, or a crossover pivot above `len`.
    #[error("bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Crossover between chromosomes whose gene layouts differ.
    #[error("type mismatch: expected gene layout {expected:?}, got {found:?}")]
    TypeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Bit content could not be segmented into the declared gene widths.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Bit text contains a character other than '0' or '1'.
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidText { position: usize, found: char },

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Initial population is empty, mis-sized, or mixes layouts.
    #[error("invalid population: {0}")]
    InvalidPopulation(String),
}

/// Result alias used throughout the crate.
pub type GaResult<T> = Result<T, GaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GaError::IndexOutOfRange { index: 9, len: 9 };
        assert_eq!(err.to_string(), "bit index 9 out of range for length 9");

        let err = GaError::TypeMismatch {
            expected: vec![9, 9, 9],
            found: vec![9, 9],
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected gene layout [9, 9, 9], got [9, 9]"
        );

        let err = GaError::InvalidText {
            position: 2,
            found: 'x',
        };
        assert_eq!(err.to_string(), "invalid bit character 'x' at position 2");
    }
}
