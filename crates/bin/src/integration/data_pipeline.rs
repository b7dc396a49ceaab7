//! Yahoo Finance data source backed by the SQLite cache.
//!
//! Closes and profiles are read from the cache when it covers the request
//! and fetched concurrently from Yahoo Finance otherwise. Fetched data is
//! written back to the cache.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use rsrank::MarketDataSource;
use rsrank::strength::Interval;
use rsrank_data::{
    DataError, MetadataLookup, Period, PriceTable, SecurityProfile, SqliteCache,
    YahooProfileProvider, YahooQuoteProvider,
};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default number of concurrent quote fetches.
const QUOTE_CONCURRENCY: usize = 10;

/// Default number of concurrent profile fetches.
const PROFILE_CONCURRENCY: usize = 4;

/// Configuration for data fetching.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchConfig {
    /// Whether to use the cache.
    pub use_cache: bool,
    /// Whether to force refresh (ignore cached entries, still write back).
    pub force_refresh: bool,
    /// Whether to draw progress bars.
    pub show_progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            force_refresh: false,
            show_progress: true,
        }
    }
}

/// Market data from Yahoo Finance with an optional local cache.
#[derive(Debug)]
pub(crate) struct YahooSource {
    quotes: YahooQuoteProvider,
    profiles: YahooProfileProvider,
    cache: Option<Mutex<SqliteCache>>,
    overrides: MetadataLookup,
    config: FetchConfig,
}

impl YahooSource {
    /// Create a source. Profiles in `overrides` are used instead of fetching.
    pub(crate) fn new(
        cache: Option<SqliteCache>,
        overrides: MetadataLookup,
        config: FetchConfig,
    ) -> Result<Self, DataError> {
        Ok(Self {
            quotes: YahooQuoteProvider::new()?,
            profiles: YahooProfileProvider::new()?,
            cache: cache.filter(|_| config.use_cache).map(Mutex::new),
            overrides,
            config,
        })
    }

    fn progress_bar(&self, len: usize, message: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓░"));
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(message);
        pb
    }

    /// Split `symbols` into cached frames and symbols still to fetch.
    async fn cached_closes(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> (Vec<LazyFrame>, Vec<String>) {
        let end = Utc::now().date_naive();
        let start = period.start_date(end);

        let Some(cache) = self.cache.as_ref().filter(|_| !self.config.force_refresh) else {
            return (Vec::new(), symbols.to_vec());
        };
        let cache = cache.lock().await;

        let mut cached = Vec::new();
        let mut missing = Vec::new();
        for symbol in symbols {
            if cache
                .has_closes(symbol, interval, start, end)
                .unwrap_or(false)
                && let Ok(df) = cache.get_closes(symbol, interval, start, end)
            {
                debug!(symbol = %symbol, "closes served from cache");
                cached.push(df.lazy());
                continue;
            }
            missing.push(symbol.clone());
        }
        (cached, missing)
    }

    async fn store_closes(&self, symbol: &str, interval: Interval, df: &DataFrame) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.lock().await.put_closes(interval, df)
        {
            warn!(symbol, error = %e, "failed to cache closes");
        }
    }

    async fn profile(&self, symbol: &str) -> Option<SecurityProfile> {
        if self.config.force_refresh {
            return None;
        }
        let cache = self.cache.as_ref()?;
        cache.lock().await.get_profile(symbol).ok().flatten()
    }

    async fn store_profile(&self, symbol: &str, profile: &SecurityProfile) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.lock().await.put_profile(symbol, profile)
        {
            warn!(symbol, error = %e, "failed to cache profile");
        }
    }
}

impl MarketDataSource for YahooSource {
    async fn fetch_prices(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> Result<PriceTable, DataError> {
        let end = Utc::now().date_naive();
        let start = period.start_date(end);

        let (cached, to_fetch) = self.cached_closes(symbols, period, interval).await;
        info!(
            cached = cached.len(),
            to_fetch = to_fetch.len(),
            "resolved price history"
        );

        let pb = self.progress_bar(symbols.len(), "Fetching price history...");
        pb.set_position(cached.len() as u64);

        let fetched: Vec<LazyFrame> = stream::iter(to_fetch)
            .map(|symbol| async move {
                let result = self.quotes.fetch_closes(&symbol, start, end, interval).await;
                (symbol, result)
            })
            .buffer_unordered(QUOTE_CONCURRENCY)
            .filter_map(|(symbol, result)| {
                let pb = &pb;
                async move {
                    pb.inc(1);
                    match result {
                        Ok(df) => {
                            self.store_closes(&symbol, interval, &df).await;
                            Some(df.lazy())
                        }
                        Err(e) => {
                            pb.suspend(|| {
                                warn!(symbol = %symbol, error = %e, "failed to fetch closes");
                            });
                            None
                        }
                    }
                }
            })
            .collect()
            .await;

        let frames: Vec<LazyFrame> = cached.into_iter().chain(fetched).collect();
        pb.finish_with_message(format!("Loaded {} symbols", frames.len()));

        if frames.is_empty() {
            return Ok(PriceTable::default());
        }
        let combined = concat(frames, UnionArgs::default())?.collect()?;
        PriceTable::from_long_frame(&combined)
    }

    async fn fetch_metadata(&self, symbols: &[String]) -> Result<MetadataLookup, DataError> {
        let pb = self.progress_bar(symbols.len(), "Fetching profiles...");

        let profiles: Vec<(String, SecurityProfile)> = stream::iter(symbols.iter().cloned())
            .map(|symbol| {
                let pb = &pb;
                async move {
                    let profile = if self.overrides.contains(&symbol) {
                        self.overrides.get(&symbol)
                    } else if let Some(profile) = self.profile(&symbol).await {
                        profile
                    } else {
                        match self.profiles.fetch_profile(&symbol).await {
                            Ok(profile) => {
                                self.store_profile(&symbol, &profile).await;
                                profile
                            }
                            Err(e) => {
                                pb.suspend(|| {
                                    warn!(symbol = %symbol, error = %e, "failed to fetch profile");
                                });
                                SecurityProfile::unknown()
                            }
                        }
                    };
                    pb.inc(1);
                    (symbol, profile)
                }
            })
            .buffer_unordered(PROFILE_CONCURRENCY)
            .collect()
            .await;

        pb.finish_with_message(format!("Loaded {} profiles", profiles.len()));
        Ok(profiles.into_iter().collect())
    }
}

/// Print cache location and contents.
pub(crate) fn print_cache_info(cache: Option<&SqliteCache>) {
    println!("  Cache location: {}", super::cache_manager::cache_path().display());
    if let Some(stats) = cache.and_then(|c| c.get_stats().ok()) {
        println!(
            "  Cached data: {} closes for {} symbols, {} profiles",
            stats.total_closes, stats.unique_symbols, stats.profiles
        );
    }
}
