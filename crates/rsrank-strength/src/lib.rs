#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;
pub mod interval;
pub mod scorer;
pub mod series;
pub mod snapshot;

pub use error::StrengthError;
pub use growth::{lookback_window, period_growth, quarterly_growth};
pub use interval::Interval;
pub use scorer::{ExponentialScorer, StrengthScorer, StrengthWindow, WeightedScorer};
pub use series::{PriceSeries, StrengthSeries, TimeSeries};
pub use snapshot::{Horizon, Snapshot, StrengthSnapshot, extract_snapshot};

/// Round to two decimal places, ties to even.
///
/// Every strength value and every industry mean is reported at this precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(101.234), 101.23);
        assert_eq!(round2(-3.456), -3.46);
        assert_eq!(round2(0.125), 0.12);
    }
}
