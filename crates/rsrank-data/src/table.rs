//! Close prices of many symbols on one shared date index.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use rsrank_strength::PriceSeries;
use std::collections::{BTreeMap, BTreeSet};

/// Close prices keyed by symbol, aligned on the union of all observed dates.
///
/// A symbol without an observation on some date holds a missing value there,
/// so every series taken from the table shares the same index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    closes: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    /// Build a table from `(symbol, date, close)` observations.
    ///
    /// A repeated `(symbol, date)` keeps the last close seen.
    pub fn from_observations<I, S>(observations: I) -> Self
    where
        I: IntoIterator<Item = (S, NaiveDate, Option<f64>)>,
        S: Into<String>,
    {
        let mut by_symbol: BTreeMap<String, BTreeMap<NaiveDate, Option<f64>>> = BTreeMap::new();
        let mut all_dates = BTreeSet::new();

        for (symbol, date, close) in observations {
            all_dates.insert(date);
            by_symbol
                .entry(symbol.into())
                .or_default()
                .insert(date, close.filter(|c| c.is_finite()));
        }

        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();
        let closes = by_symbol
            .into_iter()
            .map(|(symbol, observed)| {
                let aligned = dates
                    .iter()
                    .map(|d| observed.get(d).copied().flatten())
                    .collect();
                (symbol, aligned)
            })
            .collect();

        Self { dates, closes }
    }

    /// Build a table from a long `DataFrame` with `symbol`, `date` and `close` columns.
    ///
    /// # Errors
    /// Returns an error if a column is missing or has an unexpected type.
    pub fn from_long_frame(df: &DataFrame) -> Result<Self> {
        let symbols = df.column("symbol")?.str()?;
        let dates = df.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let closes = df.column("close")?.cast(&DataType::Float64)?;
        let closes = closes.f64()?;

        let mut observations = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let symbol = symbols
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing symbol".to_string()))?;
            let date = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing date".to_string()))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("Invalid date '{date}': {e}")))?;
            observations.push((symbol.to_string(), date, closes.get(i)));
        }

        Ok(Self::from_observations(observations))
    }

    /// Convert back to a long `DataFrame` with `symbol`, `date` and `close` columns.
    ///
    /// Missing closes are omitted.
    ///
    /// # Errors
    /// Returns an error if polars rejects the columns.
    pub fn to_long_frame(&self) -> Result<DataFrame> {
        let mut symbols = Vec::new();
        let mut dates = Vec::new();
        let mut closes = Vec::new();

        for (symbol, values) in &self.closes {
            for (date, close) in self.dates.iter().zip(values) {
                if let Some(close) = close {
                    symbols.push(symbol.clone());
                    dates.push(date.to_string());
                    closes.push(*close);
                }
            }
        }

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into(),
            Series::new("date".into(), dates).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let df = df
            .lazy()
            .with_column(col("date").cast(DataType::Date))
            .collect()?;

        Ok(df)
    }

    /// The shared date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Symbols present in the table, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.closes.keys().map(String::as_str)
    }

    /// Whether `symbol` has a column in the table.
    pub fn contains(&self, symbol: &str) -> bool {
        self.closes.contains_key(symbol)
    }

    /// Whether the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.closes.is_empty()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// The price series of `symbol` on the shared index.
    ///
    /// # Errors
    /// Returns [`DataError::MissingData`] if the symbol is absent.
    pub fn series(&self, symbol: &str) -> Result<PriceSeries> {
        let values = self.closes.get(symbol).ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "Symbol not in price table".to_string(),
        })?;

        PriceSeries::new(self.dates.clone(), values.clone()).map_err(|source| DataError::Series {
            symbol: symbol.to_string(),
            source,
        })
    }

    /// Merge another table into this one, re-aligning on the union of dates.
    ///
    /// Symbols present in both keep the other table's observations where both have one.
    pub fn merge(&mut self, other: Self) {
        let mut observations = self.observations();
        observations.extend(other.observations());
        *self = Self::from_observations(observations);
    }

    fn observations(&self) -> Vec<(String, NaiveDate, Option<f64>)> {
        self.closes
            .iter()
            .flat_map(|(symbol, values)| {
                self.dates
                    .iter()
                    .zip(values)
                    .filter(|(_, v)| v.is_some())
                    .map(move |(d, v)| (symbol.clone(), *d, *v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample() -> PriceTable {
        PriceTable::from_observations(vec![
            ("^GSPC", date(1), Some(5000.0)),
            ("^GSPC", date(4), Some(5010.0)),
            ("^GSPC", date(5), Some(5020.0)),
            ("AAPL", date(4), Some(180.0)),
            ("AAPL", date(5), Some(f64::NAN)),
        ])
    }

    #[test]
    fn test_aligns_on_union_of_dates() {
        let table = sample();
        assert_eq!(table.dates(), &[date(1), date(4), date(5)]);
        assert_eq!(table.len(), 2);

        let aapl = table.series("AAPL").unwrap();
        assert_eq!(aapl.values(), &[None, Some(180.0), None]);
        assert_eq!(aapl.dates(), table.series("^GSPC").unwrap().dates());
    }

    #[test]
    fn test_missing_symbol() {
        let table = sample();
        assert!(!table.contains("MSFT"));
        assert!(matches!(
            table.series("MSFT"),
            Err(DataError::MissingData { .. })
        ));
    }

    #[test]
    fn test_long_frame_round_trip() {
        let table = sample();
        let df = table.to_long_frame().unwrap();
        assert_eq!(df.height(), 4);

        let restored = PriceTable::from_long_frame(&df).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_merge_adds_symbols_and_dates() {
        let mut table = sample();
        table.merge(PriceTable::from_observations(vec![("MSFT", date(6), Some(400.0))]));

        assert_eq!(table.len(), 3);
        assert_eq!(table.dates().len(), 4);
        assert_eq!(table.series("AAPL").unwrap().values()[3], None);
        assert_eq!(table.series("MSFT").unwrap().values()[3], Some(400.0));
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::default();
        assert!(table.is_empty());
        assert_eq!(table.symbols().count(), 0);
    }
}
