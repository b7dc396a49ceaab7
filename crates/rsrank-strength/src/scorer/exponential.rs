//! Exponentially smoothed 3-month strength.
//!
//! Single-period growth is smoothed with an EMA of span one quarter, then
//! summed over a rolling quarter to approximate the compounded return of the
//! last three months. The reference term uses an absolute denominator so a
//! reference in deep drawdown does not flip the sign of the result.

use super::{StrengthScorer, ensure_aligned, price_relative};
use crate::error::StrengthError;
use crate::growth::period_growth;
use crate::interval::Interval;
use crate::series::{PriceSeries, StrengthSeries};

/// Short-window strength scorer based on smoothed period growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialScorer;

impl ExponentialScorer {
    /// Smoothed cumulative growth of a single price series.
    pub fn cumulative_growth(prices: &PriceSeries, interval: Interval) -> Vec<f64> {
        let span = interval.periods_per_quarter();
        let smoothed = ema(&period_growth(prices), span);
        rolling_sum(&smoothed, span)
    }
}

impl StrengthScorer for ExponentialScorer {
    fn name(&self) -> &str {
        "exponential_3mo"
    }

    fn score(
        &self,
        target: &PriceSeries,
        reference: &PriceSeries,
        interval: Interval,
    ) -> Result<StrengthSeries, StrengthError> {
        ensure_aligned(target, reference)?;

        let target_growth = Self::cumulative_growth(target, interval);
        let reference_growth = Self::cumulative_growth(reference, interval);

        Ok(target.with_values(price_relative(
            &target_growth,
            &reference_growth,
            true,
        )))
    }
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the first value.
fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = prev.map_or(value, |p| (1.0 - alpha) * p + alpha * value);
        out.push(next);
        prev = Some(next);
    }

    out
}

/// Sum of the trailing `window` values, using whatever is available at the start.
fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|t| {
            let start = (t + 1).saturating_sub(window);
            values[start..=t].iter().sum()
        })
        .collect()
}
