//! Date-indexed series of optional values.

use crate::error::StrengthError;
use chrono::NaiveDate;

/// A date-indexed series with possibly missing values.
///
/// The index is strictly increasing. `NaN` inputs are stored as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

/// Closing prices of one security or of the reference index.
pub type PriceSeries = TimeSeries;

/// Comparative strength values, 100 meaning parity with the reference.
pub type StrengthSeries = TimeSeries;

impl TimeSeries {
    /// Create a series from parallel dates and values.
    ///
    /// # Errors
    /// Returns an error if the lengths differ or the dates are not strictly increasing.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Result<Self, StrengthError> {
        if dates.len() != values.len() {
            return Err(StrengthError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if let Some(pos) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(StrengthError::UnorderedIndex(pos + 1));
        }

        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();

        Ok(Self { dates, values })
    }

    /// Create a series from `(date, value)` pairs.
    ///
    /// # Errors
    /// Returns an error if the dates are not strictly increasing.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, StrengthError>
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Create a series that shares this series' index.
    pub(crate) fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), self.dates.len());
        Self {
            dates: self.dates.clone(),
            values,
        }
    }

    /// The date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The values, aligned with [`Self::dates`].
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of points.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no points.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Last date of the index.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Values with each gap replaced by the last value seen before it.
    ///
    /// Leading gaps stay missing.
    pub fn forward_filled(&self) -> Vec<Option<f64>> {
        let mut last = None;
        self.values
            .iter()
            .map(|v| {
                if v.is_some() {
                    last = *v;
                }
                last
            })
            .collect()
    }

    /// Latest non-missing value at or before `date`.
    pub fn as_of(&self, date: NaiveDate) -> Option<f64> {
        let end = self.dates.partition_point(|d| *d <= date);
        self.values[..end].iter().rev().find_map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = TimeSeries::new(vec![date(2024, 1, 1)], vec![]);
        assert!(matches!(result, Err(StrengthError::LengthMismatch { .. })));
    }

    #[test]
    fn test_rejects_unordered_index() {
        let result = TimeSeries::new(
            vec![date(2024, 1, 2), date(2024, 1, 2)],
            vec![Some(1.0), Some(2.0)],
        );
        assert_eq!(result.unwrap_err(), StrengthError::UnorderedIndex(1));
    }

    #[test]
    fn test_nan_is_missing() {
        let series = TimeSeries::new(vec![date(2024, 1, 1)], vec![Some(f64::NAN)]).unwrap();
        assert_eq!(series.values(), &[None]);
    }

    #[test]
    fn test_forward_fill_keeps_leading_gap() {
        let series = TimeSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
            vec![None, Some(10.0), None, Some(12.0)],
        )
        .unwrap();
        assert_eq!(
            series.forward_filled(),
            vec![None, Some(10.0), Some(10.0), Some(12.0)]
        );
    }

    #[test]
    fn test_as_of_lookup() {
        let series = TimeSeries::new(
            vec![date(2024, 1, 2), date(2024, 1, 5), date(2024, 1, 8)],
            vec![Some(1.0), None, Some(3.0)],
        )
        .unwrap();

        assert_eq!(series.as_of(date(2024, 1, 1)), None);
        assert_eq!(series.as_of(date(2024, 1, 2)), Some(1.0));
        // Missing value at the exact date falls back to the previous one
        assert_eq!(series.as_of(date(2024, 1, 6)), Some(1.0));
        assert_eq!(series.as_of(date(2024, 1, 8)), Some(3.0));
        assert_eq!(series.as_of(date(2030, 1, 1)), Some(3.0));
    }
}
