//! Windowed price growth.
//!
//! Growth is the percentage change of the forward-filled price over a trailing
//! window. Positions without a usable predecessor are reported as `0.0`, the
//! neutral value, rather than as missing.

use crate::interval::Interval;
use crate::series::PriceSeries;

/// Look-back window, in periods, for `quarters_back` quarters.
///
/// Capped at `len - 1` so a short history still yields a window inside the series.
pub const fn lookback_window(len: usize, quarters_back: usize, interval: Interval) -> usize {
    let nominal = quarters_back * interval.periods_per_quarter();
    let available = len.saturating_sub(1);
    if nominal < available {
        nominal
    } else {
        available
    }
}

/// Growth over the last `quarters_back` quarters at every position.
///
/// ```
/// use chrono::NaiveDate;
/// use rsrank_strength::{Interval, TimeSeries, quarterly_growth};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let closes = [100.0, 102.0, 105.0, 103.0, 107.0, 110.0, 112.0];
/// let series = TimeSeries::from_pairs(
///     closes.iter().enumerate().map(|(i, c)| (start + chrono::Days::new(i as u64), Some(*c))),
/// )
/// .unwrap();
///
/// let growth = quarterly_growth(&series, 1, Interval::Daily);
/// assert!((growth[6] - 0.12).abs() < 1e-12);
/// ```
pub fn quarterly_growth(prices: &PriceSeries, quarters_back: usize, interval: Interval) -> Vec<f64> {
    let window = lookback_window(prices.len(), quarters_back, interval);
    pct_change(&prices.forward_filled(), window)
}

/// Period-over-period growth at every position.
pub fn period_growth(prices: &PriceSeries) -> Vec<f64> {
    pct_change(&prices.forward_filled(), 1)
}

fn pct_change(values: &[Option<f64>], periods: usize) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(t, current)| {
            let Some(start) = t.checked_sub(periods) else {
                return 0.0;
            };
            match (*current, values[start]) {
                (Some(current), Some(previous)) => {
                    let growth = (current - previous) / previous;
                    if growth.is_finite() { growth } else { 0.0 }
                }
                _ => 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimeSeries;
    use approx::assert_relative_eq;
    use chrono::{Days, NaiveDate};
    use rstest::rstest;

    fn series(values: &[Option<f64>]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TimeSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (start + Days::new(i as u64), *v)),
        )
        .unwrap()
    }

    fn closes(values: &[f64]) -> PriceSeries {
        series(&values.iter().map(|v| Some(*v)).collect::<Vec<_>>())
    }

    #[rstest]
    #[case(7, 1, Interval::Daily, 6)]
    #[case(500, 1, Interval::Daily, 63)]
    #[case(500, 4, Interval::Daily, 252)]
    #[case(200, 4, Interval::Daily, 199)]
    #[case(100, 4, Interval::Weekly, 52)]
    #[case(10, 4, Interval::Monthly, 9)]
    #[case(1, 2, Interval::Daily, 0)]
    #[case(0, 2, Interval::Daily, 0)]
    fn test_lookback_window(
        #[case] len: usize,
        #[case] quarters: usize,
        #[case] interval: Interval,
        #[case] expected: usize,
    ) {
        assert_eq!(lookback_window(len, quarters, interval), expected);
    }

    #[test]
    fn test_window_never_exceeds_series() {
        for len in 0..80 {
            for quarters in 1..=4 {
                for interval in Interval::ALL {
                    assert!(lookback_window(len, quarters, interval) <= len.saturating_sub(1));
                }
            }
        }
    }

    #[test]
    fn test_short_series_caps_window() {
        let prices = closes(&[100.0, 102.0, 105.0, 103.0, 107.0, 110.0, 112.0]);
        let growth = quarterly_growth(&prices, 1, Interval::Daily);

        assert_eq!(growth.len(), 7);
        assert_eq!(&growth[..6], &[0.0; 6]);
        assert_relative_eq!(growth[6], 0.12, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_has_zero_growth() {
        let prices = closes(&[50.0; 300]);
        for quarters in 1..=4 {
            let growth = quarterly_growth(&prices, quarters, Interval::Daily);
            assert!(growth.iter().all(|g| *g == 0.0));
        }
    }

    #[test]
    fn test_gaps_are_forward_filled() {
        let prices = series(&[Some(100.0), None, Some(110.0), None]);
        let growth = period_growth(&prices);

        assert_eq!(growth[0], 0.0);
        assert_eq!(growth[1], 0.0);
        assert_relative_eq!(growth[2], 0.1, epsilon = 1e-12);
        assert_eq!(growth[3], 0.0);
    }

    #[test]
    fn test_leading_gap_is_neutral() {
        let prices = series(&[None, None, Some(10.0), Some(11.0)]);
        let growth = period_growth(&prices);

        assert_eq!(&growth[..3], &[0.0, 0.0, 0.0]);
        assert_relative_eq!(growth[3], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_series() {
        let prices = closes(&[42.0]);
        assert_eq!(quarterly_growth(&prices, 4, Interval::Daily), vec![0.0]);
    }
}
