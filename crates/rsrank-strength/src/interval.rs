//! Sampling interval of a price series.

use crate::error::StrengthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of the closing prices.
///
/// A "quarter" is a fixed count of periods at this interval, derived from
/// 252 trading days, 52 weeks or 12 months per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    Daily,
    /// One bar per week.
    Weekly,
    /// One bar per month.
    Monthly,
}

impl Interval {
    /// All supported intervals.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Number of periods in one quarter.
    pub const fn periods_per_quarter(&self) -> usize {
        match self {
            Self::Daily => 252 / 4,
            Self::Weekly => 52 / 4,
            Self::Monthly => 12 / 4,
        }
    }

    /// Interval code understood by Yahoo Finance.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = StrengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "d" | "day" | "daily" => Ok(Self::Daily),
            "1wk" | "1w" | "w" | "week" | "weekly" => Ok(Self::Weekly),
            "1mo" | "1m" | "m" | "month" | "monthly" => Ok(Self::Monthly),
            _ => Err(StrengthError::UnknownInterval(s.to_string())),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = StrengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.code().to_string()
    }
}
