//! Ranking pipeline from price history to rated stock and industry tables.

use crate::config::RankingConfig;
use crate::error::RankingError;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rsrank_data::{DataError, MetadataLookup, Period, PriceTable};
use rsrank_rank::{
    DEFAULT_INDUSTRY_COLUMNS, IndustryRecord, RatingError, SecurityRecord, aggregate_by_industry,
    apply_ratings, industries_to_frame, securities_to_frame, sort_by_current_strength,
};
use rsrank_strength::{Horizon, Interval, extract_snapshot};
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, info, warn};

/// Source of price history and sector/industry metadata.
pub trait MarketDataSource {
    /// Fetch closes of `symbols` over `period` at `interval`, as one table.
    ///
    /// Symbols the source cannot serve may be left out of the table.
    fn fetch_prices(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> impl Future<Output = Result<PriceTable, DataError>>;

    /// Fetch sector and industry of `symbols`.
    fn fetch_metadata(
        &self,
        symbols: &[String],
    ) -> impl Future<Output = Result<MetadataLookup, DataError>>;
}

/// Rated stock and industry tables, strongest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rankings {
    /// Last date of the price history
    pub as_of: Option<NaiveDate>,
    /// Stock rows
    pub securities: Vec<SecurityRecord>,
    /// Industry rows
    pub industries: Vec<IndustryRecord>,
}

impl Rankings {
    /// Whether no security could be ranked.
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// The stock table as a `DataFrame`.
    pub fn securities_frame(&self) -> Result<DataFrame, RatingError> {
        securities_to_frame(&self.securities)
    }

    /// The industry table as a `DataFrame`.
    pub fn industries_frame(&self) -> Result<DataFrame, RatingError> {
        industries_to_frame(&self.industries)
    }
}

/// Tickers in first-seen order without repeats.
fn unique_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

/// Rank `tickers` from a price table and metadata already in hand.
///
/// Tickers missing from `prices` are skipped. An empty table yields empty
/// rankings.
///
/// # Errors
/// Returns [`RankingError::MissingReference`] if a non-empty table has no
/// series for the benchmark, or any scoring error.
pub fn rank_from_data(
    tickers: &[String],
    prices: &PriceTable,
    metadata: &MetadataLookup,
    config: &RankingConfig,
) -> Result<Rankings, RankingError> {
    if prices.is_empty() {
        warn!("price table is empty, nothing to rank");
        return Ok(Rankings::default());
    }
    if !prices.contains(&config.reference) {
        return Err(RankingError::MissingReference(config.reference.clone()));
    }
    let reference = prices.series(&config.reference)?;

    let mut securities = Vec::new();
    for ticker in unique_tickers(tickers) {
        if !prices.contains(&ticker) {
            warn!(ticker = %ticker, "no price history, skipping");
            continue;
        }
        let series = prices.series(&ticker)?;
        let strength = config.window.score(&series, &reference, config.interval)?;
        let Some(snapshot) = extract_snapshot(&strength, &series) else {
            warn!(ticker = %ticker, "empty strength series, skipping");
            continue;
        };

        let profile = metadata.get(&ticker);
        debug!(
            ticker = %ticker,
            strength = ?snapshot.strength.current(),
            industry = %profile.industry,
            "scored security"
        );
        securities.push(SecurityRecord::from_snapshot(
            ticker,
            profile.sector,
            profile.industry,
            &snapshot,
        ));
    }

    sort_by_current_strength(&mut securities);
    apply_ratings(&mut securities, config.method);

    let mut industries =
        aggregate_by_industry(&securities, &DEFAULT_INDUSTRY_COLUMNS, Horizon::Current);
    sort_by_current_strength(&mut industries);
    apply_ratings(&mut industries, config.method);

    info!(
        securities = securities.len(),
        industries = industries.len(),
        reference = %config.reference,
        window = %config.window,
        method = %config.method,
        "rankings complete"
    );

    Ok(Rankings {
        as_of: prices.dates().last().copied(),
        securities,
        industries,
    })
}

/// Fetches data through a [`MarketDataSource`] and ranks it.
#[derive(Debug)]
pub struct RankingEngine<S> {
    source: S,
    config: RankingConfig,
}

impl<S: MarketDataSource> RankingEngine<S> {
    /// Create an engine.
    pub const fn new(source: S, config: RankingConfig) -> Self {
        Self { source, config }
    }

    /// The run configuration.
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// The data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch prices for `tickers` plus the benchmark, fetch metadata for
    /// `tickers`, then rank.
    ///
    /// # Errors
    /// Fetch errors propagate unchanged; see [`rank_from_data`] for the rest.
    pub async fn run(&self, tickers: &[String]) -> Result<Rankings, RankingError> {
        let tickers = unique_tickers(tickers);
        let mut symbols = tickers.clone();
        if !symbols.contains(&self.config.reference) {
            symbols.push(self.config.reference.clone());
        }

        info!(
            symbols = symbols.len(),
            period = %self.config.period,
            interval = %self.config.interval,
            "fetching price history"
        );
        let prices = self
            .source
            .fetch_prices(&symbols, self.config.period, self.config.interval)
            .await?;

        info!(symbols = tickers.len(), "fetching metadata");
        let metadata = self.source.fetch_metadata(&tickers).await?;

        rank_from_data(&tickers, &prices, &metadata, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_tickers_keeps_first_occurrence() {
        let tickers: Vec<String> = ["B", "A", "B", "C", "A"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_tickers(&tickers), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty_table_yields_empty_rankings() {
        let rankings = rank_from_data(
            &["AAPL".to_string()],
            &PriceTable::default(),
            &MetadataLookup::new(),
            &RankingConfig::default(),
        )
        .unwrap();
        assert!(rankings.is_empty());
        assert!(rankings.industries.is_empty());
        assert_eq!(rankings.as_of, None);
    }
}
