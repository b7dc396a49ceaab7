//! Integration tests for price tables backed by the SQLite cache.

use chrono::{Days, NaiveDate};
use rsrank_data::{MetadataLookup, Period, PriceTable, SecurityProfile, SqliteCache};
use rsrank_strength::Interval;

#[test]
fn test_cached_closes_rebuild_table() {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let observations: Vec<(String, NaiveDate, Option<f64>)> = ["^GSPC", "AAPL", "NVDA"]
        .iter()
        .enumerate()
        .flat_map(|(k, symbol)| {
            (0..20).map(move |i| {
                (
                    symbol.to_string(),
                    start + Days::new(i),
                    Some(100.0 * (k as f64 + 1.0) + i as f64),
                )
            })
        })
        .collect();
    let table = PriceTable::from_observations(observations);

    let cache = SqliteCache::in_memory().unwrap();
    cache
        .put_closes(Interval::Daily, &table.to_long_frame().unwrap())
        .unwrap();

    let end = start + Days::new(19);
    let mut rebuilt = PriceTable::default();
    for symbol in table.symbols() {
        let df = cache.get_closes(symbol, Interval::Daily, start, end).unwrap();
        rebuilt.merge(PriceTable::from_long_frame(&df).unwrap());
    }

    assert_eq!(rebuilt, table);
    assert_eq!(cache.get_stats().unwrap().unique_symbols, 3);
}

#[test]
fn test_profiles_round_trip_into_lookup() {
    let cache = SqliteCache::in_memory().unwrap();
    cache
        .put_profile("JPM", &SecurityProfile::new("Financial Services", "Banks - Diversified"))
        .unwrap();

    let mut lookup = MetadataLookup::new();
    for symbol in ["JPM", "XYZ"] {
        if let Some(profile) = cache.get_profile(symbol).unwrap() {
            lookup.insert(symbol, profile);
        }
    }

    assert_eq!(lookup.get("JPM").industry, "Banks - Diversified");
    assert!(lookup.get("XYZ").is_unknown());
}

#[test]
fn test_period_window_for_cache_lookup() {
    let end = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
    let period: Period = "6mo".parse().unwrap();
    assert_eq!(period.start_date(end), NaiveDate::from_ymd_opt(2023, 12, 28).unwrap());
}
