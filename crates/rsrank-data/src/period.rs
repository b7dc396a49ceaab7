//! Look-back periods for price history requests.

use crate::error::DataError;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of price history to request, counted back from the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// `Nd`
    Days(u32),
    /// `Nwk`
    Weeks(u32),
    /// `Nmo`
    Months(u32),
    /// `Ny`
    Years(u32),
    /// Since January 1st of the end date's year
    YearToDate,
    /// All available history
    Max,
}

impl Default for Period {
    fn default() -> Self {
        Self::Years(2)
    }
}

/// Earliest start date requested for [`Period::Max`].
const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 2) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

impl Period {
    /// First calendar date covered when the history ends at `end`.
    pub fn start_date(&self, end: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::Days(n) => end.checked_sub_days(Days::new(u64::from(*n))),
            Self::Weeks(n) => end.checked_sub_days(Days::new(7 * u64::from(*n))),
            Self::Months(n) => end.checked_sub_months(Months::new(*n)),
            Self::Years(n) => end.checked_sub_months(Months::new(12 * n)),
            Self::YearToDate => NaiveDate::from_ymd_opt(end.year(), 1, 1),
            Self::Max => Some(EPOCH),
        };
        start.unwrap_or(EPOCH).max(EPOCH)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n}d"),
            Self::Weeks(n) => write!(f, "{n}wk"),
            Self::Months(n) => write!(f, "{n}mo"),
            Self::Years(n) => write!(f, "{n}y"),
            Self::YearToDate => f.write_str("ytd"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl FromStr for Period {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "ytd" => return Ok(Self::YearToDate),
            "max" => return Ok(Self::Max),
            _ => {}
        }

        let digits = normalized.chars().take_while(char::is_ascii_digit).count();
        let (count, unit) = normalized.split_at(digits);
        let count: u32 = count
            .parse()
            .map_err(|_| DataError::InvalidPeriod(s.to_string()))?;
        if count == 0 {
            return Err(DataError::InvalidPeriod(s.to_string()));
        }

        match unit {
            "d" => Ok(Self::Days(count)),
            "wk" | "w" => Ok(Self::Weeks(count)),
            "mo" | "m" => Ok(Self::Months(count)),
            "y" => Ok(Self::Years(count)),
            _ => Err(DataError::InvalidPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
