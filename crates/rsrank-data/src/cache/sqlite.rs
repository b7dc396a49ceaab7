//! SQLite caching layer for closes and profiles.

use crate::error::{DataError, Result};
use crate::metadata::SecurityProfile;
use chrono::{NaiveDate, Utc};
use polars::prelude::*;
use rsrank_strength::Interval;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite cache for market data.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Create a new SQLite cache.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS closes (
                symbol TEXT NOT NULL,
                interval TEXT NOT NULL,
                date TEXT NOT NULL,
                close REAL NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (symbol, interval, date)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                symbol TEXT PRIMARY KEY,
                sector TEXT NOT NULL,
                industry TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Check if closes are cached for a symbol and date range.
    ///
    /// The range counts as covered when the cache holds at least 90% of the
    /// periods expected for `interval`, and the latest cached date is within
    /// one period of `end`.
    pub fn has_closes(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        let (count, latest): (i64, Option<String>) = self.conn.query_row(
            "SELECT COUNT(*), MAX(date) FROM closes
             WHERE symbol = ?1 AND interval = ?2 AND date >= ?3 AND date <= ?4",
            params![symbol, interval.code(), start.to_string(), end.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let Some(latest) = latest else {
            return Ok(false);
        };
        let latest = NaiveDate::parse_from_str(&latest, "%Y-%m-%d")
            .map_err(|e| DataError::Parse(format!("Invalid cached date '{latest}': {e}")))?;

        let days = (end - start).num_days().max(0);
        let (per_period, expected) = match interval {
            // Five trading days a week
            Interval::Daily => (4, days * 5 / 7),
            Interval::Weekly => (7, days / 7),
            Interval::Monthly => (31, days / 30),
        };
        let fresh = (end - latest).num_days() <= per_period;

        Ok(fresh && count * 10 >= expected * 9)
    }

    /// Get cached closes for a symbol and date range.
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, close
    pub fn get_closes(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DataFrame> {
        let mut stmt = self.conn.prepare(
            "SELECT date, close
             FROM closes
             WHERE symbol = ?1 AND interval = ?2 AND date >= ?3 AND date <= ?4
             ORDER BY date ASC",
        )?;

        let mut dates = Vec::new();
        let mut closes = Vec::new();

        let rows = stmt.query_map(
            params![symbol, interval.code(), start.to_string(), end.to_string()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)),
        )?;

        for row in rows {
            let (date, close) = row?;
            dates.push(date);
            closes.push(close);
        }

        if dates.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No cached data found".to_string(),
            });
        }

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), vec![symbol; dates.len()]).into(),
            Series::new("date".into(), dates).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let df = df
            .lazy()
            .with_column(col("date").cast(DataType::Date))
            .collect()?;

        Ok(df)
    }

    /// Store closes from a DataFrame with columns: symbol, date, close.
    pub fn put_closes(&self, interval: Interval, df: &DataFrame) -> Result<()> {
        let cached_at = Utc::now().to_rfc3339();

        let symbols = df.column("symbol")?.str()?;
        let dates = df.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let closes = df.column("close")?.f64()?;

        let tx = self.conn.unchecked_transaction()?;

        for i in 0..df.height() {
            let symbol = symbols
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing symbol".to_string()))?;
            let date = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing date".to_string()))?;
            let Some(close) = closes.get(i).filter(|c| c.is_finite()) else {
                continue;
            };

            tx.execute(
                "INSERT OR REPLACE INTO closes (symbol, interval, date, close, cached_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![symbol, interval.code(), date, close, cached_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Get the cached profile of a symbol.
    pub fn get_profile(&self, symbol: &str) -> Result<Option<SecurityProfile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT sector, industry FROM profiles WHERE symbol = ?1",
                params![symbol],
                |row| Ok(SecurityProfile::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        Ok(profile)
    }

    /// Store the profile of a symbol.
    pub fn put_profile(&self, symbol: &str, profile: &SecurityProfile) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO profiles (symbol, sector, industry, cached_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                symbol,
                profile.sector,
                profile.industry,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Clear all cached data.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM closes", [])?;
        self.conn.execute("DELETE FROM profiles", [])?;
        Ok(())
    }

    /// Clear cached data for a specific symbol.
    pub fn clear_symbol(&self, symbol: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM closes WHERE symbol = ?1", params![symbol])?;
        self.conn
            .execute("DELETE FROM profiles WHERE symbol = ?1", params![symbol])?;
        Ok(())
    }

    /// Get cache statistics.
    pub fn get_stats(&self) -> Result<CacheStats> {
        let closes_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM closes", [], |row| row.get(0))?;

        let symbols_count: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT symbol) FROM closes", [], |row| {
                    row.get(0)
                })?;

        let profiles_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;

        Ok(CacheStats {
            total_closes: closes_count as usize,
            unique_symbols: symbols_count as usize,
            profiles: profiles_count as usize,
        })
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of close records
    pub total_closes: usize,
    /// Number of unique symbols with closes
    pub unique_symbols: usize,
    /// Number of cached profiles
    pub profiles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn closes_frame(symbol: &str, start: NaiveDate, closes: &[f64]) -> DataFrame {
        let dates: Vec<String> = (0..closes.len())
            .map(|i| (start + Days::new(i as u64)).to_string())
            .collect();
        DataFrame::new(vec![
            Series::new("symbol".into(), vec![symbol; closes.len()]).into(),
            Series::new("date".into(), dates).into(),
            Series::new("close".into(), closes.to_vec()).into(),
        ])
        .unwrap()
        .lazy()
        .with_column(col("date").cast(DataType::Date))
        .collect()
        .unwrap()
    }

    #[test]
    fn test_cache_initialization() {
        let cache = SqliteCache::in_memory();
        assert!(cache.is_ok());
    }

    #[test]
    fn test_close_operations() {
        let cache = SqliteCache::in_memory().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let df = closes_frame("AAPL", start, &[180.0, 181.5, 179.25]);

        cache.put_closes(Interval::Daily, &df).unwrap();

        let end = start + Days::new(2);
        let cached = cache.get_closes("AAPL", Interval::Daily, start, end).unwrap();
        assert_eq!(cached.height(), 3);
        assert_eq!(cached.column("close").unwrap().f64().unwrap().get(1), Some(181.5));

        // Other intervals are stored separately
        assert!(matches!(
            cache.get_closes("AAPL", Interval::Weekly, start, end),
            Err(DataError::MissingData { .. })
        ));
    }

    #[test]
    fn test_has_closes_coverage() {
        let cache = SqliteCache::in_memory().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let df = closes_frame("MSFT", start, &[400.0; 28]);
        cache.put_closes(Interval::Daily, &df).unwrap();

        let end = start + Days::new(27);
        assert!(cache.has_closes("MSFT", Interval::Daily, start, end).unwrap());

        // Stale tail
        let later = end + Days::new(30);
        assert!(!cache.has_closes("MSFT", Interval::Daily, start, later).unwrap());
        assert!(!cache.has_closes("NVDA", Interval::Daily, start, end).unwrap());
    }

    #[test]
    fn test_profile_operations() {
        let cache = SqliteCache::in_memory().unwrap();
        assert_eq!(cache.get_profile("NVDA").unwrap(), None);

        let profile = SecurityProfile::new("Technology", "Semiconductors");
        cache.put_profile("NVDA", &profile).unwrap();
        assert_eq!(cache.get_profile("NVDA").unwrap(), Some(profile));
    }

    #[test]
    fn test_cache_stats_and_clear() {
        let cache = SqliteCache::in_memory().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        cache
            .put_closes(Interval::Daily, &closes_frame("AAPL", start, &[1.0, 2.0]))
            .unwrap();
        cache
            .put_closes(Interval::Daily, &closes_frame("MSFT", start, &[3.0]))
            .unwrap();
        cache
            .put_profile("AAPL", &SecurityProfile::new("Technology", "Consumer Electronics"))
            .unwrap();

        let stats = cache.get_stats().unwrap();
        assert_eq!(
            stats,
            CacheStats {
                total_closes: 3,
                unique_symbols: 2,
                profiles: 1,
            }
        );

        cache.clear_symbol("AAPL").unwrap();
        let stats = cache.get_stats().unwrap();
        assert_eq!(stats.total_closes, 1);
        assert_eq!(stats.profiles, 0);

        cache.clear_all().unwrap();
        assert_eq!(cache.get_stats().unwrap().total_closes, 0);
    }
}
