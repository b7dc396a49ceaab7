//! Integration tests for the ranking pipeline with an in-memory data source.

use chrono::{Days, NaiveDate};
use rsrank::data::{DataError, MetadataLookup, Period, PriceTable, SecurityProfile};
use rsrank::rank::{Rating, RatingMethod};
use rsrank::strength::{Horizon, Interval, StrengthWindow};
use rsrank::{MarketDataSource, RankingConfig, RankingEngine, RankingError, rank_from_data};
use rstest::rstest;
use std::sync::Mutex;

const POINTS: u64 = 300;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn linear(symbol: &str, base: f64, slope: f64) -> Vec<(String, NaiveDate, Option<f64>)> {
    (0..POINTS)
        .map(|i| {
            (
                symbol.to_string(),
                start() + Days::new(i),
                Some(base * (1.0 + slope * i as f64)),
            )
        })
        .collect()
}

/// Benchmark rising slowly; LEAD outpaces it, FLAT stands still, LAG falls.
fn prices() -> PriceTable {
    let mut observations = linear("^GSPC", 100.0, 0.001);
    observations.extend(linear("LEAD", 100.0, 0.003));
    observations.extend(linear("FLAT", 50.0, 0.0));
    observations.extend(linear("LAG", 80.0, -0.001));
    PriceTable::from_observations(observations)
}

fn metadata() -> MetadataLookup {
    let mut lookup = MetadataLookup::new();
    lookup.insert("LEAD", SecurityProfile::new("Technology", "Semiconductors"));
    lookup.insert("FLAT", SecurityProfile::new("Technology", "Semiconductors"));
    lookup.insert("LAG", SecurityProfile::new("Financial Services", "Banks - Regional"));
    lookup
}

fn tickers(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

#[rstest]
#[case(StrengthWindow::TwelveMonth)]
#[case(StrengthWindow::ThreeMonth)]
fn test_securities_ranked_by_strength(#[case] window: StrengthWindow) {
    let config = RankingConfig::default().with_window(window);
    let rankings = rank_from_data(
        &tickers(&["LAG", "FLAT", "LEAD"]),
        &prices(),
        &metadata(),
        &config,
    )
    .unwrap();

    let order: Vec<&str> = rankings.securities.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(order, vec!["LEAD", "FLAT", "LAG"]);

    let lead = &rankings.securities[0];
    let lag = &rankings.securities[2];
    assert!(lead.strength.current().unwrap() > 100.0);
    assert!(lag.strength.current().unwrap() < 100.0);

    let ratings: Vec<_> = rankings
        .securities
        .iter()
        .map(|s| s.ratings.current().map(Rating::value))
        .collect();
    assert_eq!(ratings, vec![Some(99), Some(66), Some(34)]);

    assert_eq!(rankings.as_of, Some(start() + Days::new(POINTS - 1)));
}

#[test]
fn test_industries_aggregated_and_rated() {
    let rankings = rank_from_data(
        &tickers(&["LAG", "FLAT", "LEAD"]),
        &prices(),
        &metadata(),
        &RankingConfig::default(),
    )
    .unwrap();

    let industries: Vec<&str> = rankings.industries.iter().map(|i| i.industry.as_str()).collect();
    assert_eq!(industries, vec!["Semiconductors", "Banks - Regional"]);

    let semis = &rankings.industries[0];
    assert_eq!(semis.members_joined(), "LEAD,FLAT");
    assert_eq!(semis.sector, "Technology");

    let lead = rankings.securities[0].strength.current().unwrap();
    let flat = rankings.securities[1].strength.current().unwrap();
    let mean = semis.strength.current().unwrap();
    assert!((mean - (lead + flat) / 2.0).abs() <= 0.005 + 1e-9);

    assert_eq!(semis.ratings.current(), Rating::new(99));
    assert_eq!(rankings.industries[1].ratings.current(), Rating::new(50));
}

#[test]
fn test_missing_ticker_skipped_and_metadata_defaults() {
    let rankings = rank_from_data(
        &tickers(&["LEAD", "ZZZZ", "LEAD", "FLAT"]),
        &prices(),
        &MetadataLookup::new(),
        &RankingConfig::default(),
    )
    .unwrap();

    assert_eq!(rankings.securities.len(), 2);
    assert!(rankings.securities.iter().all(|s| s.industry == "Unknown"));
    assert_eq!(rankings.industries.len(), 1);
    assert_eq!(rankings.industries[0].members, vec!["LEAD", "FLAT"]);
}

#[test]
fn test_missing_reference_is_an_error() {
    let config = RankingConfig::default().with_reference("^NDX");
    let result = rank_from_data(&tickers(&["LEAD"]), &prices(), &metadata(), &config);
    assert!(matches!(result, Err(RankingError::MissingReference(symbol)) if symbol == "^NDX"));
}

#[test]
fn test_identical_inputs_identical_outputs() {
    let config = RankingConfig::default().with_method(RatingMethod::Qcut);
    let symbols = tickers(&["LAG", "FLAT", "LEAD"]);
    let first = rank_from_data(&symbols, &prices(), &metadata(), &config).unwrap();
    let second = rank_from_data(&symbols, &prices(), &metadata(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_history_snapshots_present() {
    let rankings = rank_from_data(
        &tickers(&["LEAD"]),
        &prices(),
        &metadata(),
        &RankingConfig::default(),
    )
    .unwrap();

    let strength = &rankings.securities[0].strength;
    for horizon in Horizon::ALL {
        assert!(strength.get(horizon).is_some(), "missing {horizon}");
    }
}

#[test]
fn test_frames_have_expected_shape() {
    let rankings = rank_from_data(
        &tickers(&["LAG", "FLAT", "LEAD"]),
        &prices(),
        &metadata(),
        &RankingConfig::default(),
    )
    .unwrap();

    assert_eq!(rankings.securities_frame().unwrap().shape(), (3, 12));
    assert_eq!(rankings.industries_frame().unwrap().shape(), (2, 11));
}

/// Serves fixed data and records which symbols were requested.
struct InMemorySource {
    prices: PriceTable,
    metadata: MetadataLookup,
    requested: Mutex<Vec<String>>,
    fail: bool,
}

impl InMemorySource {
    fn new() -> Self {
        Self {
            prices: prices(),
            metadata: metadata(),
            requested: Mutex::new(Vec::new()),
            fail: false,
        }
    }
}

impl MarketDataSource for InMemorySource {
    async fn fetch_prices(
        &self,
        symbols: &[String],
        _period: Period,
        _interval: Interval,
    ) -> Result<PriceTable, DataError> {
        if self.fail {
            return Err(DataError::Http("HTTP 503".to_string()));
        }
        self.requested.lock().unwrap().extend(symbols.iter().cloned());
        Ok(self.prices.clone())
    }

    async fn fetch_metadata(&self, _symbols: &[String]) -> Result<MetadataLookup, DataError> {
        Ok(self.metadata.clone())
    }
}

#[tokio::test]
async fn test_engine_fetches_reference_once() {
    let engine = RankingEngine::new(InMemorySource::new(), RankingConfig::default());
    let rankings = engine
        .run(&tickers(&["LEAD", "^GSPC", "FLAT", "LEAD"]))
        .await
        .unwrap();

    let requested = engine.source().requested.lock().unwrap().clone();
    assert_eq!(requested, vec!["LEAD", "^GSPC", "FLAT"]);
    assert_eq!(rankings.securities.len(), 3);
}

#[tokio::test]
async fn test_engine_appends_reference() {
    let engine = RankingEngine::new(InMemorySource::new(), RankingConfig::default());
    engine.run(&tickers(&["LAG"])).await.unwrap();

    let requested = engine.source().requested.lock().unwrap().clone();
    assert_eq!(requested, vec!["LAG", "^GSPC"]);
}

#[tokio::test]
async fn test_engine_propagates_fetch_errors() {
    let source = InMemorySource {
        fail: true,
        ..InMemorySource::new()
    };
    let engine = RankingEngine::new(source, RankingConfig::default());
    let result = engine.run(&tickers(&["LEAD"])).await;
    assert!(matches!(result, Err(RankingError::Data(DataError::Http(_)))));
}
