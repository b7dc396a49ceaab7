//! Ranking reports rendered as ASCII tables, Markdown or JSON.

use crate::export::{IndustryRow, SecurityRow};
use chrono::{DateTime, NaiveDate, Utc};
use rsrank_rank::{IndustryRecord, Rating, RatingMethod, SecurityRecord};
use rsrank_strength::StrengthWindow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SECURITY_WIDTH: usize = 118;
const INDUSTRY_WIDTH: usize = 104;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Percentile threshold outside 1..=99.
    #[error("Minimum percentile must be within 1..=99, got {0}")]
    InvalidPercentile(u8),
}

/// Stock and industry rankings prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Last date of the price history.
    pub as_of: Option<NaiveDate>,

    /// Benchmark symbol.
    pub reference: String,

    /// Strength window.
    pub window: StrengthWindow,

    /// Rating method.
    pub method: RatingMethod,

    /// Threshold applied to the stock table.
    pub min_percentile: Option<u8>,

    /// Stock rows that passed the threshold, in rank order.
    pub securities: Vec<SecurityRow>,

    /// Industry rows in rank order.
    pub industries: Vec<IndustryRow>,
}

impl RankingReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn title(&self) -> String {
        let mut title = format!(
            "Relative Strength vs {} ({}, {})",
            self.reference, self.window, self.method
        );
        if let Some(date) = self.as_of {
            title.push_str(&format!(" as of {date}"));
        }
        title
    }

    /// Render both tables as fixed-width text.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.title()));
        if let Some(min) = self.min_percentile {
            output.push_str(&format!("Minimum percentile: {min}\n"));
        }

        // Stocks
        output.push_str("\nStock Rankings\n");
        output.push_str(&"=".repeat(SECURITY_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:>5} {:<8} {:>10} {:<22} {:<30} {:>8} {:>8} {:>8} {:>8} {:>4}\n",
            "Rank", "Ticker", "Price", "Sector", "Industry", "RS", "1M", "3M", "6M", "Pct"
        ));
        output.push_str(&"-".repeat(SECURITY_WIDTH));
        output.push('\n');

        for row in &self.securities {
            output.push_str(&format!(
                "{:>5} {:<8} {:>10} {:<22.22} {:<30.30} {:>8} {:>8} {:>8} {:>8} {:>4}\n",
                row.rank,
                row.symbol,
                decimal(row.price),
                row.sector,
                row.industry,
                decimal(row.strength),
                decimal(row.strength_1m),
                decimal(row.strength_3m),
                decimal(row.strength_6m),
                rating(row.percentile)
            ));
        }
        output.push_str(&"=".repeat(SECURITY_WIDTH));
        output.push('\n');

        // Industries
        output.push_str("\nIndustry Rankings\n");
        output.push_str(&"=".repeat(INDUSTRY_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:>5} {:<30} {:<22} {:>8} {:>8} {:>8} {:>8} {:>4}  {}\n",
            "Rank", "Industry", "Sector", "RS", "1M", "3M", "6M", "Pct", "Tickers"
        ));
        output.push_str(&"-".repeat(INDUSTRY_WIDTH));
        output.push('\n');

        for row in &self.industries {
            output.push_str(&format!(
                "{:>5} {:<30.30} {:<22.22} {:>8} {:>8} {:>8} {:>8} {:>4}  {}\n",
                row.rank,
                row.industry,
                row.sector,
                decimal(row.strength),
                decimal(row.strength_1m),
                decimal(row.strength_3m),
                decimal(row.strength_6m),
                rating(row.percentile),
                row.members
            ));
        }
        output.push_str(&"=".repeat(INDUSTRY_WIDTH));
        output.push('\n');

        output
    }

    /// Render both tables as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title()));
        if let Some(min) = self.min_percentile {
            output.push_str(&format!("**Minimum percentile:** {min}\n\n"));
        }

        output.push_str("## Stock Rankings\n\n");
        output.push_str(
            "| Rank | Ticker | Price | Sector | Industry | RS | 1M | 3M | 6M | Percentile |\n",
        );
        output.push_str(
            "|------|--------|-------|--------|----------|----|----|----|----|------------|\n",
        );
        for row in &self.securities {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                row.rank,
                row.symbol,
                decimal(row.price),
                row.sector,
                row.industry,
                decimal(row.strength),
                decimal(row.strength_1m),
                decimal(row.strength_3m),
                decimal(row.strength_6m),
                rating(row.percentile)
            ));
        }

        output.push_str("\n## Industry Rankings\n\n");
        output.push_str("| Rank | Industry | Sector | RS | 1M | 3M | 6M | Percentile | Tickers |\n");
        output.push_str("|------|----------|--------|----|----|----|----|------------|---------|\n");
        for row in &self.industries {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                row.rank,
                row.industry,
                row.sector,
                decimal(row.strength),
                decimal(row.strength_1m),
                decimal(row.strength_3m),
                decimal(row.strength_6m),
                rating(row.percentile),
                row.members
            ));
        }

        output
    }
}

fn decimal(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn rating(value: Option<Rating>) -> String {
    value.map_or_else(|| "-".to_string(), |r| r.to_string())
}

/// Builder for creating ranking reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    as_of: Option<NaiveDate>,
    reference: Option<String>,
    window: StrengthWindow,
    method: RatingMethod,
    min_percentile: Option<u8>,
    limit: Option<usize>,
    securities: Vec<SecurityRow>,
    industries: Vec<IndustryRow>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the last date of the price history.
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Set the benchmark symbol.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the strength window.
    pub const fn window(mut self, window: StrengthWindow) -> Self {
        self.window = window;
        self
    }

    /// Set the rating method.
    pub const fn method(mut self, method: RatingMethod) -> Self {
        self.method = method;
        self
    }

    /// Keep only stocks whose current rating is at least `min`.
    pub const fn min_percentile(mut self, min: u8) -> Self {
        self.min_percentile = Some(min);
        self
    }

    /// Show at most `limit` rows per table.
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the stock table, already in rank order.
    pub fn securities(mut self, records: &[SecurityRecord]) -> Self {
        self.securities = SecurityRow::from_records(records);
        self
    }

    /// Set the industry table, already in rank order.
    pub fn industries(mut self, records: &[IndustryRecord]) -> Self {
        self.industries = IndustryRow::from_records(records);
        self
    }

    /// Build the report.
    ///
    /// Ranks are assigned before the percentile filter, so filtered tables
    /// keep their original positions.
    pub fn build(self) -> Result<RankingReport, ReportError> {
        let mut securities = self.securities;
        if let Some(min) = self.min_percentile {
            let threshold = Rating::new(min).ok_or(ReportError::InvalidPercentile(min))?;
            securities.retain(|row| row.percentile.is_some_and(|p| p >= threshold));
        }

        let mut industries = self.industries;
        if let Some(limit) = self.limit {
            securities.truncate(limit);
            industries.truncate(limit);
        }

        Ok(RankingReport {
            timestamp: Utc::now(),
            as_of: self.as_of,
            reference: self.reference.unwrap_or_else(|| "^GSPC".to_string()),
            window: self.window,
            method: self.method,
            min_percentile: self.min_percentile,
            securities,
            industries,
        })
    }
}
