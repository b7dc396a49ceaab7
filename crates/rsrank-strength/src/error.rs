//! Error types for strength computation.

use thiserror::Error;

/// Errors raised while building series or scoring strength.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrengthError {
    /// Unrecognised sampling interval name
    #[error("Unknown interval '{0}': expected one of 1d, 1wk, 1mo")]
    UnknownInterval(String),

    /// Unrecognised strength window name
    #[error("Unknown strength window '{0}': expected one of 3mo, 12mo")]
    UnknownWindow(String),

    /// Dates and values of a series have different lengths
    #[error("Series length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates
        dates: usize,
        /// Number of values
        values: usize,
    },

    /// Dates are not strictly increasing
    #[error("Series index is not strictly increasing at position {0}")]
    UnorderedIndex(usize),

    /// Target and reference series do not share the same index
    #[error("Target and reference series are not aligned ({target} vs {reference} points)")]
    Misaligned {
        /// Number of points in the target series
        target: usize,
        /// Number of points in the reference series
        reference: usize,
    },
}
