//! Industry composites built from security rows.
//!
//! Securities are grouped by exact industry name. Each requested column is
//! reduced according to its role: the identifier column becomes an ordered
//! member list, numeric columns become a two-decimal mean, and categorical
//! columns keep the first value seen.

use crate::record::{IndustryRecord, SecurityRecord, descending_nulls_last};
use rsrank_strength::{Horizon, round2};
use std::collections::BTreeMap;

/// A column of the security table that can be carried into the industry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityColumn {
    /// Ticker symbol
    Symbol,
    /// Latest price
    Price,
    /// Sector name
    Sector,
    /// Strength at a horizon
    Strength(Horizon),
}

/// Reduction applied to a column when securities are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Ordered list of member values
    Members,
    /// Mean of non-missing member values, two decimals
    Mean,
    /// First member value in table order
    First,
}

impl SecurityColumn {
    /// How this column is reduced per industry.
    pub const fn aggregation(&self) -> Aggregation {
        match self {
            Self::Symbol => Aggregation::Members,
            Self::Price | Self::Strength(_) => Aggregation::Mean,
            Self::Sector => Aggregation::First,
        }
    }

    fn numeric(&self, record: &SecurityRecord) -> Option<f64> {
        match self {
            Self::Price => record.price,
            Self::Strength(horizon) => record.strength.get(*horizon),
            Self::Symbol | Self::Sector => None,
        }
    }
}

/// Columns carried into the industry table by the ranking pipeline.
pub const DEFAULT_INDUSTRY_COLUMNS: [SecurityColumn; 6] = [
    SecurityColumn::Sector,
    SecurityColumn::Strength(Horizon::Current),
    SecurityColumn::Strength(Horizon::OneMonth),
    SecurityColumn::Strength(Horizon::ThreeMonths),
    SecurityColumn::Strength(Horizon::SixMonths),
    SecurityColumn::Symbol,
];

/// Group `securities` by industry and reduce the requested `columns`.
///
/// Groups are returned in ascending industry name order. Members are ordered
/// by the strength at `ordering_key`, highest first, with ties kept in table
/// order and missing values last. Columns not requested keep their defaults.
/// The returned records are unrated.
pub fn aggregate_by_industry(
    securities: &[SecurityRecord],
    columns: &[SecurityColumn],
    ordering_key: Horizon,
) -> Vec<IndustryRecord> {
    let mut groups: BTreeMap<&str, Vec<&SecurityRecord>> = BTreeMap::new();
    for security in securities {
        groups.entry(security.industry.as_str()).or_default().push(security);
    }

    groups
        .into_iter()
        .map(|(industry, members)| {
            let mut record = IndustryRecord {
                industry: industry.to_string(),
                ..Default::default()
            };
            for column in columns {
                reduce_column(&mut record, *column, &members, ordering_key);
            }
            record
        })
        .collect()
}

fn reduce_column(
    record: &mut IndustryRecord,
    column: SecurityColumn,
    members: &[&SecurityRecord],
    ordering_key: Horizon,
) {
    match column.aggregation() {
        Aggregation::Members => {
            let mut ordered = members.to_vec();
            ordered.sort_by(|a, b| {
                descending_nulls_last(a.strength.get(ordering_key), b.strength.get(ordering_key))
            });
            record.members = ordered.iter().map(|m| m.symbol.clone()).collect();
        }
        Aggregation::Mean => {
            let mean = mean(members.iter().filter_map(|m| column.numeric(m)));
            match column {
                SecurityColumn::Price => record.price = mean,
                SecurityColumn::Strength(horizon) => record.strength.set(horizon, mean),
                SecurityColumn::Symbol | SecurityColumn::Sector => {}
            }
        }
        Aggregation::First => {
            if let Some(first) = members.first() {
                record.sector = first.sector.clone();
            }
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| round2(sum / count as f64))
}
