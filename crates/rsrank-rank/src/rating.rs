//! Cross-sectional percentile ratings.
//!
//! A rating places one value within the population of non-missing values it
//! was computed with, on a 1 to 99 scale. Two methods are available:
//!
//! - [`RatingMethod::Rank`]: average-rank percentile `p` in `(0, 1]`, mapped to
//!   `round(p * 98 + 1)`, rounding half to even.
//! - [`RatingMethod::Qcut`]: equal-frequency buckets over 99 quantile intervals,
//!   numbered from 1. Duplicate bucket edges are merged, so heavily tied
//!   populations use fewer buckets.

use crate::error::RatingError;
use derive_more::{Display, Into};
use rsrank_strength::{Horizon, StrengthSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of quantile intervals used by [`RatingMethod::Qcut`].
const QCUT_BUCKETS: usize = 99;

/// A rating in `1..=99`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: Self = Self(1);
    /// Highest rating.
    pub const MAX: Self = Self(99);

    /// Create a rating, or `None` outside `1..=99`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The rating value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Clamp a computed bucket number into range.
    fn saturating(value: usize) -> Self {
        let clamped = value.clamp(usize::from(Self::MIN.0), usize::from(Self::MAX.0));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX.0))
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(RatingError::OutOfRange(u32::from(value)))
    }
}

/// Rating algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RatingMethod {
    /// Rank percentile scaled onto 1..=99
    #[default]
    Rank,
    /// Equal-frequency buckets numbered 1..=99
    Qcut,
}

impl RatingMethod {
    /// Method name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Qcut => "qcut",
        }
    }
}

impl fmt::Display for RatingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RatingMethod {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "qcut" => Ok(Self::Qcut),
            _ => Err(RatingError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for RatingMethod {
    type Error = RatingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RatingMethod> for String {
    fn from(method: RatingMethod) -> Self {
        method.name().to_string()
    }
}

/// Ratings at the four snapshot horizons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSet {
    values: [Option<Rating>; 4],
}

impl RatingSet {
    /// Rating at a horizon.
    pub fn get(&self, horizon: Horizon) -> Option<Rating> {
        self.values[slot(horizon)]
    }

    /// Set the rating at a horizon.
    pub fn set(&mut self, horizon: Horizon, rating: Option<Rating>) {
        self.values[slot(horizon)] = rating;
    }

    /// Current rating.
    pub fn current(&self) -> Option<Rating> {
        self.get(Horizon::Current)
    }
}

fn slot(horizon: Horizon) -> usize {
    Horizon::ALL
        .iter()
        .position(|h| *h == horizon)
        .unwrap_or_default()
}

/// Rate every value against the non-missing values of the same slice.
///
/// Missing and `NaN` inputs produce missing ratings and are excluded from the
/// population. The output is aligned with the input.
///
/// ```
/// use rsrank_rank::{RatingMethod, rate};
///
/// let ratings = rate(&[Some(120.0), Some(100.0), None, Some(80.0)], RatingMethod::Rank);
/// let values: Vec<Option<u8>> = ratings.iter().map(|r| r.map(|r| r.value())).collect();
/// assert_eq!(values, vec![Some(99), Some(66), None, Some(34)]);
/// ```
pub fn rate(values: &[Option<f64>], method: RatingMethod) -> Vec<Option<Rating>> {
    match method {
        RatingMethod::Rank => rank_ratings(values),
        RatingMethod::Qcut => qcut_ratings(values),
    }
}

/// Ratings for one strength column of a set of snapshots.
pub fn rate_horizon<'a, I>(snapshots: I, horizon: Horizon, method: RatingMethod) -> Vec<Option<Rating>>
where
    I: IntoIterator<Item = &'a StrengthSnapshot>,
{
    let values: Vec<Option<f64>> = snapshots.into_iter().map(|s| s.get(horizon)).collect();
    rate(&values, method)
}

fn valid(values: &[Option<f64>]) -> Vec<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .collect()
}

fn rank_ratings(values: &[Option<f64>]) -> Vec<Option<Rating>> {
    let mut present = valid(values);
    let mut ratings = vec![None; values.len()];
    if present.is_empty() {
        return ratings;
    }

    present.sort_by(|a, b| a.1.total_cmp(&b.1));
    let n = present.len() as f64;

    let mut start = 0;
    while start < present.len() {
        let mut end = start + 1;
        while end < present.len() && present[end].1.total_cmp(&present[start].1) == Ordering::Equal {
            end += 1;
        }
        // Tied positions start+1..=end share their average rank
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let scaled = (average_rank / n * 98.0 + 1.0).round_ties_even() as usize;
        let rating = Rating::saturating(scaled);
        for (index, _) in &present[start..end] {
            ratings[*index] = Some(rating);
        }
        start = end;
    }

    ratings
}

fn qcut_ratings(values: &[Option<f64>]) -> Vec<Option<Rating>> {
    let present = valid(values);
    let mut ratings = vec![None; values.len()];

    let mut sorted: Vec<f64> = present.iter().map(|(_, v)| *v).collect();
    sorted.sort_by(f64::total_cmp);

    let edges = quantile_edges(&sorted);
    if edges.len() < 2 {
        return ratings;
    }

    for (index, value) in present {
        let below = edges.partition_point(|edge| *edge < value);
        ratings[index] = Some(Rating::saturating(below));
    }

    ratings
}

/// Distinct quantile edges at `k / 99` for `k = 0..=99` of sorted data.
fn quantile_edges(sorted: &[f64]) -> Vec<f64> {
    if sorted.is_empty() {
        return Vec::new();
    }

    let mut edges: Vec<f64> = (0..=QCUT_BUCKETS)
        .map(|k| quantile(sorted, k as f64 / QCUT_BUCKETS as f64))
        .collect();
    edges.dedup();
    edges
}

/// Linearly interpolated quantile of sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let t = position - lower as f64;
    let (a, b) = (sorted[lower], sorted[upper]);
    if t >= 0.5 {
        b - (b - a) * (1.0 - t)
    } else {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(ratings: &[Option<Rating>]) -> Vec<Option<u8>> {
        ratings.iter().map(|r| r.map(Rating::value)).collect()
    }

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(1))]
    #[case(99, Some(99))]
    #[case(100, None)]
    fn test_rating_bounds(#[case] raw: u8, #[case] expected: Option<u8>) {
        assert_eq!(Rating::new(raw).map(Rating::value), expected);
        assert_eq!(Rating::try_from(raw).ok().map(u8::from), expected);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("rank".parse::<RatingMethod>().unwrap(), RatingMethod::Rank);
        assert_eq!(" QCUT ".parse::<RatingMethod>().unwrap(), RatingMethod::Qcut);
        assert!(matches!(
            "zscore".parse::<RatingMethod>(),
            Err(RatingError::UnknownMethod(_))
        ));
        assert_eq!(RatingMethod::default(), RatingMethod::Rank);
    }

    #[test]
    fn test_rank_three_values() {
        let ratings = rate(&[Some(120.0), Some(100.0), Some(80.0)], RatingMethod::Rank);
        // pct = 1, 2/3, 1/3
        assert_eq!(values(&ratings), vec![Some(99), Some(66), Some(34)]);
    }

    #[test]
    fn test_rank_ties_share_average() {
        let ratings = rate(&[Some(5.0), Some(5.0), Some(1.0), Some(9.0)], RatingMethod::Rank);
        // ranks 2.5, 2.5, 1, 4 of 4; 0.25 * 98 + 1 = 25.5 rounds to even
        assert_eq!(values(&ratings), vec![Some(62), Some(62), Some(26), Some(99)]);
    }

    #[test]
    fn test_rank_rounds_after_offset() {
        let ratings = rate(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)], RatingMethod::Rank);
        // 25.5 and 74.5 both round to even
        assert_eq!(values(&ratings), vec![Some(26), Some(50), Some(74), Some(99)]);
    }

    #[test]
    fn test_rank_single_value() {
        assert_eq!(values(&rate(&[Some(42.0)], RatingMethod::Rank)), vec![Some(99)]);
    }

    #[test]
    fn test_missing_values_excluded() {
        let ratings = rate(&[None, Some(2.0), Some(f64::NAN), Some(1.0)], RatingMethod::Rank);
        assert_eq!(values(&ratings), vec![None, Some(99), None, Some(50)]);
    }

    #[rstest]
    #[case(RatingMethod::Rank)]
    #[case(RatingMethod::Qcut)]
    fn test_empty_and_all_missing(#[case] method: RatingMethod) {
        assert!(rate(&[], method).is_empty());
        assert_eq!(values(&rate(&[None, None], method)), vec![None, None]);
    }

    #[test]
    fn test_qcut_equal_frequency() {
        let input: Vec<Option<f64>> = (0..=99).map(|i| Some(f64::from(i))).collect();
        let ratings = values(&rate(&input, RatingMethod::Qcut));

        assert_eq!(ratings[0], Some(1));
        assert_eq!(ratings[99], Some(99));
        assert!(ratings.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_qcut_three_values() {
        let ratings = rate(&[Some(120.0), Some(100.0), Some(80.0)], RatingMethod::Qcut);
        // Edges are evenly spaced over [80, 120]
        assert_eq!(values(&ratings), vec![Some(99), Some(50), Some(1)]);
    }

    #[test]
    fn test_qcut_all_equal_is_degenerate() {
        let ratings = rate(&[Some(3.0), Some(3.0), Some(3.0)], RatingMethod::Qcut);
        assert_eq!(values(&ratings), vec![None, None, None]);
    }

    #[test]
    fn test_qcut_single_value_is_degenerate() {
        assert_eq!(values(&rate(&[Some(1.0)], RatingMethod::Qcut)), vec![None]);
    }

    #[test]
    fn test_qcut_heavy_ties_merge_buckets() {
        let mut input = vec![Some(1.0); 90];
        input.extend((0..10).map(|i| Some(2.0 + f64::from(i))));
        let ratings = values(&rate(&input, RatingMethod::Qcut));

        // Every tied value lands in the lowest bucket
        assert!(ratings[..90].iter().all(|r| *r == Some(1)));
        assert!(ratings.iter().flatten().all(|r| (1..=99).contains(r)));
    }

    #[test]
    fn test_rating_set_horizons() {
        let mut set = RatingSet::default();
        set.set(Horizon::ThreeMonths, Rating::new(42));
        assert_eq!(set.get(Horizon::ThreeMonths).map(Rating::value), Some(42));
        assert_eq!(set.current(), None);
    }
}
