//! Error types for ratings.

use thiserror::Error;

/// Errors that can occur while rating or tabulating records.
#[derive(Debug, Error)]
pub enum RatingError {
    /// Unrecognised rating method name
    #[error("Unknown rating method '{0}', expected 'rank' or 'qcut'")]
    UnknownMethod(String),

    /// Rating outside 1..=99
    #[error("Rating {0} is outside the range 1..=99")]
    OutOfRange(u32),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
