//! Point-in-time sampling of a strength series.

use crate::round2;
use crate::series::{PriceSeries, StrengthSeries};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Look-back horizon of a snapshot field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Horizon {
    /// Latest date of the series
    Current,
    /// One calendar month before the latest date
    OneMonth,
    /// Three calendar months before the latest date
    ThreeMonths,
    /// Six calendar months before the latest date
    SixMonths,
}

impl Horizon {
    /// All horizons, most recent first.
    pub const ALL: [Self; 4] = [
        Self::Current,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
    ];

    /// Calendar months back from the latest date.
    pub const fn months_back(&self) -> u32 {
        match self {
            Self::Current => 0,
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
        }
    }

    /// Short column label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Current => "RS",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
        }
    }

    /// Descriptive column title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Current => "Relative Strength",
            Self::OneMonth => "1 Month Ago",
            Self::ThreeMonths => "3 Months Ago",
            Self::SixMonths => "6 Months Ago",
        }
    }

    /// Target date for this horizon, month-end clamped.
    pub fn date_from(&self, end: NaiveDate) -> Option<NaiveDate> {
        end.checked_sub_months(Months::new(self.months_back()))
    }

    const fn index(self) -> usize {
        match self {
            Self::Current => 0,
            Self::OneMonth => 1,
            Self::ThreeMonths => 2,
            Self::SixMonths => 3,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength values at the four horizons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthSnapshot {
    values: [Option<f64>; 4],
}

impl StrengthSnapshot {
    /// Create a snapshot from current, 1-month, 3-month and 6-month values.
    pub const fn new(
        current: Option<f64>,
        one_month: Option<f64>,
        three_months: Option<f64>,
        six_months: Option<f64>,
    ) -> Self {
        Self {
            values: [current, one_month, three_months, six_months],
        }
    }

    /// Value at a horizon.
    pub const fn get(&self, horizon: Horizon) -> Option<f64> {
        self.values[horizon.index()]
    }

    /// Set the value at a horizon.
    pub const fn set(&mut self, horizon: Horizon, value: Option<f64>) {
        self.values[horizon.index()] = value;
    }

    /// Latest strength value.
    pub const fn current(&self) -> Option<f64> {
        self.get(Horizon::Current)
    }
}

/// Strength and price sampled at the end of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Latest date of the strength series
    pub end_date: NaiveDate,
    /// Closing price as of the latest date, two decimals
    pub price: Option<f64>,
    /// Strength at each horizon
    pub strength: StrengthSnapshot,
}

/// Sample `strength` now and 1, 3 and 6 months back, with the price as of now.
///
/// Every lookup is as-of: the latest available value at or before the target
/// date, never interpolated. Returns `None` for an empty series.
pub fn extract_snapshot(strength: &StrengthSeries, prices: &PriceSeries) -> Option<Snapshot> {
    let end_date = strength.last_date()?;

    let mut values = StrengthSnapshot::default();
    for horizon in Horizon::ALL {
        let value = horizon
            .date_from(end_date)
            .and_then(|date| strength.as_of(date));
        values.set(horizon, value);
    }

    Some(Snapshot {
        end_date,
        price: prices.as_of(end_date).map(round2),
        strength: values,
    })
}
