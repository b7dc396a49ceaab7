//! Conversion of ranking rows into polars `DataFrame`s.

use crate::error::RatingError;
use crate::rating::{Rating, RatingSet};
use crate::record::{IndustryRecord, SecurityRecord};
use polars::prelude::*;
use rsrank_strength::{Horizon, StrengthSnapshot};

/// Ticker column name.
pub const TICKER: &str = "Ticker";
/// Member list column name of the industry table.
pub const TICKERS: &str = "Tickers";
/// Price column name.
pub const PRICE: &str = "Price";
/// Sector column name.
pub const SECTOR: &str = "Sector";
/// Industry column name.
pub const INDUSTRY: &str = "Industry";

/// Column name of the rating at `horizon`.
pub fn percentile_column(horizon: Horizon) -> String {
    match horizon {
        Horizon::Current => "Percentile".to_string(),
        other => format!("Percentile ({})", other.label()),
    }
}

/// Build the security table.
///
/// # Errors
/// Returns an error if polars rejects the columns.
pub fn securities_to_frame(records: &[SecurityRecord]) -> Result<DataFrame, RatingError> {
    let mut columns: Vec<Column> = vec![
        Series::new(
            TICKER.into(),
            records.iter().map(|r| r.symbol.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(PRICE.into(), records.iter().map(|r| r.price).collect::<Vec<_>>()).into(),
        Series::new(
            SECTOR.into(),
            records.iter().map(|r| r.sector.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            INDUSTRY.into(),
            records.iter().map(|r| r.industry.clone()).collect::<Vec<_>>(),
        )
        .into(),
    ];
    columns.extend(strength_columns(records.iter().map(|r| &r.strength)));
    columns.extend(rating_columns(records.iter().map(|r| &r.ratings)));

    Ok(DataFrame::new(columns)?)
}

/// Build the industry table.
///
/// # Errors
/// Returns an error if polars rejects the columns.
pub fn industries_to_frame(records: &[IndustryRecord]) -> Result<DataFrame, RatingError> {
    let mut columns: Vec<Column> = vec![
        Series::new(
            INDUSTRY.into(),
            records.iter().map(|r| r.industry.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            SECTOR.into(),
            records.iter().map(|r| r.sector.clone()).collect::<Vec<_>>(),
        )
        .into(),
    ];
    columns.extend(strength_columns(records.iter().map(|r| &r.strength)));
    columns.push(
        Series::new(
            TICKERS.into(),
            records.iter().map(IndustryRecord::members_joined).collect::<Vec<_>>(),
        )
        .into(),
    );
    columns.extend(rating_columns(records.iter().map(|r| &r.ratings)));

    Ok(DataFrame::new(columns)?)
}

fn strength_columns<'a, I>(snapshots: I) -> Vec<Column>
where
    I: Iterator<Item = &'a StrengthSnapshot> + Clone,
{
    Horizon::ALL
        .iter()
        .map(|horizon| {
            let values: Vec<Option<f64>> = snapshots.clone().map(|s| s.get(*horizon)).collect();
            Series::new(horizon.title().into(), values).into()
        })
        .collect()
}

fn rating_columns<'a, I>(ratings: I) -> Vec<Column>
where
    I: Iterator<Item = &'a RatingSet> + Clone,
{
    Horizon::ALL
        .iter()
        .map(|horizon| {
            let values: Vec<Option<u32>> = ratings
                .clone()
                .map(|r| r.get(*horizon).map(|x| u32::from(Rating::value(x))))
                .collect();
            Series::new(percentile_column(*horizon).into(), values).into()
        })
        .collect()
}
