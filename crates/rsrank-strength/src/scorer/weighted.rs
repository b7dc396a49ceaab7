//! Quarter-weighted 12-month strength.
//!
//! The growth over the last one, two, three and four quarters is blended with
//! the most recent quarter counted twice:
//!
//! ```text
//! weighted = (2 * g1 + g2 + g3 + g4) / 5
//! strength = (1 + weighted_target) / (1 + weighted_reference) * 100
//! ```

use super::{StrengthScorer, ensure_aligned, price_relative};
use crate::error::StrengthError;
use crate::growth::quarterly_growth;
use crate::interval::Interval;
use crate::series::{PriceSeries, StrengthSeries};

/// Long-window strength scorer with the latest quarter weighted double.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer;

impl WeightedScorer {
    /// Quarter-weighted growth of a single price series.
    pub fn weighted_growth(prices: &PriceSeries, interval: Interval) -> Vec<f64> {
        let g1 = quarterly_growth(prices, 1, interval);
        let g2 = quarterly_growth(prices, 2, interval);
        let g3 = quarterly_growth(prices, 3, interval);
        let g4 = quarterly_growth(prices, 4, interval);

        (0..prices.len())
            .map(|t| (2.0 * g1[t] + g2[t] + g3[t] + g4[t]) / 5.0)
            .collect()
    }
}

impl StrengthScorer for WeightedScorer {
    fn name(&self) -> &str {
        "weighted_12mo"
    }

    fn score(
        &self,
        target: &PriceSeries,
        reference: &PriceSeries,
        interval: Interval,
    ) -> Result<StrengthSeries, StrengthError> {
        ensure_aligned(target, reference)?;

        let target_growth = Self::weighted_growth(target, interval);
        let reference_growth = Self::weighted_growth(reference, interval);

        Ok(target.with_values(price_relative(
            &target_growth,
            &reference_growth,
            false,
        )))
    }
}
