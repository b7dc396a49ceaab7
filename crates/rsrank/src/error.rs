//! Error types for configuration and ranking runs.

use rsrank_data::DataError;
use rsrank_rank::RatingError;
use rsrank_strength::StrengthError;
use thiserror::Error;

/// Errors raised while parsing a ranking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reference symbol is blank
    #[error("Reference symbol must not be empty")]
    EmptyReference,

    /// Unknown interval or strength window
    #[error(transparent)]
    Strength(#[from] StrengthError),

    /// Unknown rating method
    #[error(transparent)]
    Rating(#[from] RatingError),

    /// Unknown look-back period
    #[error(transparent)]
    Period(#[from] DataError),

    /// Index symbol or alias not recognised
    #[error("Index symbol '{0}' not found")]
    UnknownIndex(String),
}

/// Errors that abort a ranking run.
#[derive(Debug, Error)]
pub enum RankingError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Price or metadata fetch failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Strength scoring failed
    #[error("Strength error: {0}")]
    Strength(#[from] StrengthError),

    /// Rating or table conversion failed
    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    /// The price table has no series for the benchmark
    #[error("Reference symbol '{0}' is missing from the price table")]
    MissingReference(String),
}
