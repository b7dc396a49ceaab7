//! Ranking run configuration.

use crate::error::ConfigError;
use rsrank_data::Period;
use rsrank_rank::RatingMethod;
use rsrank_strength::{Interval, StrengthWindow};
use serde::{Deserialize, Serialize};

/// Default benchmark symbol.
pub const DEFAULT_REFERENCE: &str = "^GSPC";

/// Parameters of one ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Benchmark symbol every security is compared against
    pub reference: String,
    /// Look-back period of the price history
    pub period: Period,
    /// Sampling interval of the price history
    pub interval: Interval,
    /// Rating algorithm
    pub method: RatingMethod,
    /// Strength window selecting the scorer
    pub window: StrengthWindow,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            reference: DEFAULT_REFERENCE.to_string(),
            period: Period::default(),
            interval: Interval::default(),
            method: RatingMethod::default(),
            window: StrengthWindow::default(),
        }
    }
}

impl RankingConfig {
    /// Parse every field from strings, failing on the first invalid one.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the invalid value.
    pub fn from_strs(
        reference: &str,
        period: &str,
        interval: &str,
        method: &str,
        window: &str,
    ) -> Result<Self, ConfigError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ConfigError::EmptyReference);
        }

        Ok(Self {
            reference: reference.to_string(),
            period: period.parse()?,
            interval: interval.parse()?,
            method: method.parse()?,
            window: window.parse()?,
        })
    }

    /// Set the benchmark symbol.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the look-back period.
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Set the sampling interval.
    pub const fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Set the rating method.
    pub const fn with_method(mut self, method: RatingMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the strength window.
    pub const fn with_window(mut self, window: StrengthWindow) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = RankingConfig::default();
        assert_eq!(config.reference, "^GSPC");
        assert_eq!(config.period, Period::Years(2));
        assert_eq!(config.interval, Interval::Daily);
        assert_eq!(config.method, RatingMethod::Rank);
        assert_eq!(config.window, StrengthWindow::TwelveMonth);
    }

    #[test]
    fn test_from_strs() {
        let config = RankingConfig::from_strs("^NDX", "6mo", "1wk", "qcut", "3mo").unwrap();
        assert_eq!(
            config,
            RankingConfig::default()
                .with_reference("^NDX")
                .with_period(Period::Months(6))
                .with_interval(Interval::Weekly)
                .with_method(RatingMethod::Qcut)
                .with_window(StrengthWindow::ThreeMonth)
        );
    }

    #[rstest]
    #[case("", "2y", "1d", "rank", "12mo")]
    #[case("^GSPC", "2x", "1d", "rank", "12mo")]
    #[case("^GSPC", "2y", "1h", "rank", "12mo")]
    #[case("^GSPC", "2y", "1d", "median", "12mo")]
    #[case("^GSPC", "2y", "1d", "rank", "6mo")]
    fn test_from_strs_rejects(
        #[case] reference: &str,
        #[case] period: &str,
        #[case] interval: &str,
        #[case] method: &str,
        #[case] window: &str,
    ) {
        assert!(RankingConfig::from_strs(reference, period, interval, method, window).is_err());
    }

    #[test]
    fn test_invalid_interval_error_kind() {
        let result = RankingConfig::from_strs("^GSPC", "2y", "hourly", "rank", "12mo");
        assert!(matches!(result, Err(ConfigError::Strength(_))));
    }
}
