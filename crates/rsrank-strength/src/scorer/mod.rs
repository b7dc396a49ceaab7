//! Relative strength scorers.
//!
//! Each scorer reduces a target price series and a reference price series
//! sharing the same index into one strength series, where 100 denotes parity
//! with the reference. The available scorers form a closed set selected by
//! [`StrengthWindow`].

pub mod exponential;
pub mod weighted;

pub use exponential::ExponentialScorer;
pub use weighted::WeightedScorer;

use crate::error::StrengthError;
use crate::interval::Interval;
use crate::round2;
use crate::series::{PriceSeries, StrengthSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for relative strength scorers.
pub trait StrengthScorer {
    /// Scorer name.
    fn name(&self) -> &str;

    /// Compute the strength of `target` relative to `reference`.
    ///
    /// # Errors
    /// Returns [`StrengthError::Misaligned`] if the two series do not share an index.
    fn score(
        &self,
        target: &PriceSeries,
        reference: &PriceSeries,
        interval: Interval,
    ) -> Result<StrengthSeries, StrengthError>;
}

/// Comparison window, selecting the scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrengthWindow {
    /// Short-window exponential strength ("3mo").
    ThreeMonth,
    /// Long-window quarter-weighted strength ("12mo").
    #[default]
    TwelveMonth,
}

impl StrengthWindow {
    /// Window label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ThreeMonth => "3mo",
            Self::TwelveMonth => "12mo",
        }
    }

    /// Score `target` against `reference` with this window's scorer.
    ///
    /// # Errors
    /// Returns an error if the series are not aligned.
    pub fn score(
        &self,
        target: &PriceSeries,
        reference: &PriceSeries,
        interval: Interval,
    ) -> Result<StrengthSeries, StrengthError> {
        match self {
            Self::ThreeMonth => ExponentialScorer.score(target, reference, interval),
            Self::TwelveMonth => WeightedScorer.score(target, reference, interval),
        }
    }
}

impl fmt::Display for StrengthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrengthWindow {
    type Err = StrengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3mo" | "3m" => Ok(Self::ThreeMonth),
            "12mo" | "12m" | "1y" => Ok(Self::TwelveMonth),
            _ => Err(StrengthError::UnknownWindow(s.to_string())),
        }
    }
}

impl TryFrom<String> for StrengthWindow {
    type Error = StrengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrengthWindow> for String {
    fn from(window: StrengthWindow) -> Self {
        window.label().to_string()
    }
}

pub(crate) fn ensure_aligned(
    target: &PriceSeries,
    reference: &PriceSeries,
) -> Result<(), StrengthError> {
    if target.dates() != reference.dates() {
        return Err(StrengthError::Misaligned {
            target: target.len(),
            reference: reference.len(),
        });
    }
    Ok(())
}

/// `(1 + target) / (1 + reference) * 100`, rounded to two decimals.
///
/// A zero denominator yields a missing value.
pub(crate) fn price_relative(
    target_growth: &[f64],
    reference_growth: &[f64],
    absolute_denominator: bool,
) -> Vec<Option<f64>> {
    target_growth
        .iter()
        .zip(reference_growth)
        .map(|(t, r)| {
            let denominator = if absolute_denominator {
                (1.0 + r).abs()
            } else {
                1.0 + r
            };
            if denominator == 0.0 {
                return None;
            }
            let strength = (1.0 + t) / denominator * 100.0;
            strength.is_finite().then(|| round2(strength))
        })
        .collect()
}
