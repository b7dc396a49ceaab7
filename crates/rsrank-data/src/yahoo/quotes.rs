//! Close history from Yahoo Finance.

use crate::error::{DataError, Result};
use chrono::{NaiveDate, NaiveTime};
use polars::prelude::*;
use rsrank_strength::Interval;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a provider with the default delay of 250ms after each request.
    ///
    /// # Errors
    /// Returns an error if the HTTP connector cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(250))
    }

    /// Create a provider with a custom delay after each request.
    ///
    /// # Errors
    /// Returns an error if the HTTP connector cannot be built.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            rate_limit_delay,
        })
    }

    /// Fetch split and dividend adjusted closes for one symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL" or "^GSPC")
    /// * `start` - First date of the history
    /// * `end` - Last date of the history
    /// * `interval` - Sampling interval
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, close
    pub async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = to_offset_datetime(start, NaiveTime::MIN)?;
        // Midnight after the last day, so the end date itself is included
        let end_time = to_offset_datetime(end.succ_opt().unwrap_or(end), NaiveTime::MIN)?;

        let response = self
            .provider
            .get_quote_history_interval(symbol, start_time, end_time, interval.code())
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }
        debug!(symbol, rows = quotes.len(), %interval, "fetched quotes");

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let mut df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let symbol_col: Column = Series::new("symbol".into(), vec![symbol; df.height()]).into();
        df.with_column(symbol_col)?;

        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[col("symbol"), col("date"), col("close")])
            .collect()?;

        sleep(self.rate_limit_delay).await;

        Ok(df)
    }
}

fn to_offset_datetime(date: NaiveDate, at: NaiveTime) -> Result<time::OffsetDateTime> {
    let timestamp = date.and_time(at).and_utc().timestamp();
    time::OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| DataError::TimeConversion(e.to_string()))
}
