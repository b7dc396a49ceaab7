//! CSV and JSON export of the ranking tables.
//!
//! Rows are flattened copies of the ranking records carrying a 1-based
//! `Rank` column in table order. Column names match the ranking frames.

use chrono::NaiveDate;
use rsrank_rank::{IndustryRecord, Rating, RatingMethod, SecurityRecord};
use rsrank_strength::{Horizon, StrengthWindow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("Invalid UTF-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Which ranking table a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Security rankings.
    Stocks,
    /// Industry rankings.
    Industries,
}

impl TableKind {
    /// Name used in export file names.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Industries => "industries",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File name of an exported table, e.g. `rs_stocks_12mo_rank_20240628.csv`.
pub fn export_file_name(
    kind: TableKind,
    window: StrengthWindow,
    method: RatingMethod,
    as_of: NaiveDate,
    format: ExportFormat,
) -> String {
    format!(
        "rs_{}_{}_{}_{}.{}",
        kind,
        window,
        method,
        as_of.format("%Y%m%d"),
        format.extension()
    )
}

/// One exported row of the security table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRow {
    /// Position in table order, starting at 1.
    #[serde(rename = "Rank")]
    pub rank: usize,

    /// Ticker symbol.
    #[serde(rename = "Ticker")]
    pub symbol: String,

    /// Latest closing price.
    #[serde(rename = "Price")]
    pub price: Option<f64>,

    /// Sector name.
    #[serde(rename = "Sector")]
    pub sector: String,

    /// Industry name.
    #[serde(rename = "Industry")]
    pub industry: String,

    /// Current strength.
    #[serde(rename = "Relative Strength")]
    pub strength: Option<f64>,

    /// Strength one month ago.
    #[serde(rename = "1 Month Ago")]
    pub strength_1m: Option<f64>,

    /// Strength three months ago.
    #[serde(rename = "3 Months Ago")]
    pub strength_3m: Option<f64>,

    /// Strength six months ago.
    #[serde(rename = "6 Months Ago")]
    pub strength_6m: Option<f64>,

    /// Rating of the current strength.
    #[serde(rename = "Percentile")]
    pub percentile: Option<Rating>,

    /// Rating of the strength one month ago.
    #[serde(rename = "Percentile (1M)")]
    pub percentile_1m: Option<Rating>,

    /// Rating of the strength three months ago.
    #[serde(rename = "Percentile (3M)")]
    pub percentile_3m: Option<Rating>,

    /// Rating of the strength six months ago.
    #[serde(rename = "Percentile (6M)")]
    pub percentile_6m: Option<Rating>,
}

impl SecurityRow {
    /// Flatten `record` ranked at `rank`.
    pub fn new(rank: usize, record: &SecurityRecord) -> Self {
        let s = &record.strength;
        let r = &record.ratings;
        Self {
            rank,
            symbol: record.symbol.clone(),
            price: record.price,
            sector: record.sector.clone(),
            industry: record.industry.clone(),
            strength: s.get(Horizon::Current),
            strength_1m: s.get(Horizon::OneMonth),
            strength_3m: s.get(Horizon::ThreeMonths),
            strength_6m: s.get(Horizon::SixMonths),
            percentile: r.get(Horizon::Current),
            percentile_1m: r.get(Horizon::OneMonth),
            percentile_3m: r.get(Horizon::ThreeMonths),
            percentile_6m: r.get(Horizon::SixMonths),
        }
    }

    /// Flatten records already in table order, numbering them from 1.
    pub fn from_records(records: &[SecurityRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| Self::new(i + 1, record))
            .collect()
    }
}

/// One exported row of the industry table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRow {
    /// Position in table order, starting at 1.
    #[serde(rename = "Rank")]
    pub rank: usize,

    /// Industry name.
    #[serde(rename = "Industry")]
    pub industry: String,

    /// Sector name.
    #[serde(rename = "Sector")]
    pub sector: String,

    /// Mean current strength.
    #[serde(rename = "Relative Strength")]
    pub strength: Option<f64>,

    /// Mean strength one month ago.
    #[serde(rename = "1 Month Ago")]
    pub strength_1m: Option<f64>,

    /// Mean strength three months ago.
    #[serde(rename = "3 Months Ago")]
    pub strength_3m: Option<f64>,

    /// Mean strength six months ago.
    #[serde(rename = "6 Months Ago")]
    pub strength_6m: Option<f64>,

    /// Member symbols joined by commas, strongest first.
    #[serde(rename = "Tickers")]
    pub members: String,

    /// Rating of the mean current strength.
    #[serde(rename = "Percentile")]
    pub percentile: Option<Rating>,

    /// Rating of the mean strength one month ago.
    #[serde(rename = "Percentile (1M)")]
    pub percentile_1m: Option<Rating>,

    /// Rating of the mean strength three months ago.
    #[serde(rename = "Percentile (3M)")]
    pub percentile_3m: Option<Rating>,

    /// Rating of the mean strength six months ago.
    #[serde(rename = "Percentile (6M)")]
    pub percentile_6m: Option<Rating>,
}

impl IndustryRow {
    /// Flatten `record` ranked at `rank`.
    pub fn new(rank: usize, record: &IndustryRecord) -> Self {
        let s = &record.strength;
        let r = &record.ratings;
        Self {
            rank,
            industry: record.industry.clone(),
            sector: record.sector.clone(),
            strength: s.get(Horizon::Current),
            strength_1m: s.get(Horizon::OneMonth),
            strength_3m: s.get(Horizon::ThreeMonths),
            strength_6m: s.get(Horizon::SixMonths),
            members: record.members_joined(),
            percentile: r.get(Horizon::Current),
            percentile_1m: r.get(Horizon::OneMonth),
            percentile_3m: r.get(Horizon::ThreeMonths),
            percentile_6m: r.get(Horizon::SixMonths),
        }
    }

    /// Flatten records already in table order, numbering them from 1.
    pub fn from_records(records: &[IndustryRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| Self::new(i + 1, record))
            .collect()
    }
}

/// Trait for types that can be exported to various formats.
pub trait Exporter {
    /// Export to a string in the specified format.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export to a file in the specified format.
    fn export_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn export_rows<T: Serialize>(rows: &[T], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            for row in rows {
                wtr.serialize(row)?;
            }
            let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
            Ok(String::from_utf8(bytes)?)
        }
        ExportFormat::Json => Ok(serde_json::to_string(rows)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(rows)?),
    }
}

impl Exporter for [SecurityRow] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_rows(self, format)
    }
}

impl Exporter for Vec<SecurityRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_rows(self, format)
    }
}

impl Exporter for [IndustryRow] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_rows(self, format)
    }
}

impl Exporter for Vec<IndustryRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_rows(self, format)
    }
}
