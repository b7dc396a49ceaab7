//! Ranking rows for securities and industries.

use crate::rating::{RatingMethod, RatingSet, rate_horizon};
use rsrank_strength::{Horizon, Snapshot, StrengthSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the security ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// Ticker symbol
    pub symbol: String,
    /// Latest closing price, two decimals
    pub price: Option<f64>,
    /// Sector name
    pub sector: String,
    /// Industry name
    pub industry: String,
    /// Strength now and 1, 3 and 6 months ago
    pub strength: StrengthSnapshot,
    /// Ratings of the four strength values
    pub ratings: RatingSet,
}

impl SecurityRecord {
    /// Create an unrated record from a strength snapshot.
    pub fn from_snapshot(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        industry: impl Into<String>,
        snapshot: &Snapshot,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price: snapshot.price,
            sector: sector.into(),
            industry: industry.into(),
            strength: snapshot.strength,
            ratings: RatingSet::default(),
        }
    }
}

/// One row of the industry ranking table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryRecord {
    /// Industry name
    pub industry: String,
    /// Sector of the first member in table order
    pub sector: String,
    /// Mean member price, when requested
    pub price: Option<f64>,
    /// Mean member strength at each horizon
    pub strength: StrengthSnapshot,
    /// Member symbols, strongest first
    pub members: Vec<String>,
    /// Ratings of the four mean strengths
    pub ratings: RatingSet,
}

impl IndustryRecord {
    /// Member symbols as one comma-separated string.
    pub fn members_joined(&self) -> String {
        self.members.join(",")
    }
}

/// A row carrying strength values that can be rated.
pub trait Rated {
    /// Strength values of the row.
    fn strength(&self) -> &StrengthSnapshot;

    /// Mutable ratings of the row.
    fn ratings_mut(&mut self) -> &mut RatingSet;
}

impl Rated for SecurityRecord {
    fn strength(&self) -> &StrengthSnapshot {
        &self.strength
    }

    fn ratings_mut(&mut self) -> &mut RatingSet {
        &mut self.ratings
    }
}

impl Rated for IndustryRecord {
    fn strength(&self) -> &StrengthSnapshot {
        &self.strength
    }

    fn ratings_mut(&mut self) -> &mut RatingSet {
        &mut self.ratings
    }
}

/// Rate each of the four strength columns across `records`.
pub fn apply_ratings<R: Rated>(records: &mut [R], method: RatingMethod) {
    for horizon in Horizon::ALL {
        let ratings = rate_horizon(records.iter().map(|r| r.strength()), horizon, method);
        for (record, rating) in records.iter_mut().zip(ratings) {
            record.ratings_mut().set(horizon, rating);
        }
    }
}

/// Stable sort by current strength, highest first, missing values last.
pub fn sort_by_current_strength<R: Rated>(records: &mut [R]) {
    sort_by_strength(records, Horizon::Current);
}

/// Stable sort by the strength at `horizon`, highest first, missing values last.
pub fn sort_by_strength<R: Rated>(records: &mut [R], horizon: Horizon) {
    records.sort_by(|a, b| descending_nulls_last(a.strength().get(horizon), b.strength().get(horizon)));
}

pub(crate) fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
