//! Known stock indices and their symbols.

use crate::error::ConfigError;
use crate::universe::constituents;
use std::fmt;
use std::str::FromStr;

/// An index with a known constituent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockIndex {
    /// S&P 500 (`^GSPC`, `SPX`)
    Sp500,
    /// NASDAQ-100 (`^NDX`, `NDX`)
    Nasdaq100,
    /// Dow Jones Industrial Average (`^DJI`, `DJIA`)
    Djia,
    /// PHLX Semiconductor Sector (`^SOX`, `SOX`)
    Sox,
}

impl StockIndex {
    /// All indices with constituent lists.
    pub const ALL: [Self; 4] = [Self::Sp500, Self::Nasdaq100, Self::Djia, Self::Sox];

    /// Yahoo Finance symbol of the index, usable as the benchmark.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Sp500 => "^GSPC",
            Self::Nasdaq100 => "^NDX",
            Self::Djia => "^DJI",
            Self::Sox => "^SOX",
        }
    }

    /// Common abbreviation of the index.
    pub const fn alias(&self) -> &'static str {
        match self {
            Self::Sp500 => "SPX",
            Self::Nasdaq100 => "NDX",
            Self::Djia => "DJIA",
            Self::Sox => "SOX",
        }
    }

    /// Full index name.
    pub fn name(&self) -> &'static str {
        index_name(self.symbol())
    }

    /// Constituent tickers.
    pub const fn tickers(&self) -> &'static [&'static str] {
        match self {
            Self::Sp500 => constituents::SP500,
            Self::Nasdaq100 => constituents::NASDAQ100,
            Self::Djia => constituents::DJIA,
            Self::Sox => constituents::SOX,
        }
    }
}

impl fmt::Display for StockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for StockIndex {
    type Err = ConfigError;

    /// Parse a Yahoo symbol (`^GSPC`) or alias (`SPX`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|index| {
                index.symbol().eq_ignore_ascii_case(wanted)
                    || index.alias().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ConfigError::UnknownIndex(s.to_string()))
    }
}

/// Full name of an index given its Yahoo symbol or alias.
///
/// Returns `"Unknown"` for unrecognised symbols.
pub fn index_name(symbol: &str) -> &'static str {
    match symbol {
        "^GSPC" | "SPX" => "S&P 500",
        "^DJI" | "DJIA" => "Dow Jones Industrial Average",
        "^IXIC" => "NASDAQ",
        "^NDX" | "NDX" => "NASDAQ 100",
        "^RUT" | "RUT" => "Russell 2000",
        "^SOX" | "SOX" => "PHLX Semiconductor Sector",
        "^NYA" | "NYA" => "NYSE Composite",
        "^MID" | "MID" => "S&P MidCap 400",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("^GSPC", StockIndex::Sp500)]
    #[case("SPX", StockIndex::Sp500)]
    #[case("ndx", StockIndex::Nasdaq100)]
    #[case("^DJI", StockIndex::Djia)]
    #[case("DJIA", StockIndex::Djia)]
    #[case(" SOX ", StockIndex::Sox)]
    fn test_parse_symbol_or_alias(#[case] input: &str, #[case] expected: StockIndex) {
        assert_eq!(input.parse::<StockIndex>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "^UNKNOWN".parse::<StockIndex>(),
            Err(ConfigError::UnknownIndex(_))
        ));
    }

    #[rstest]
    #[case("SPX", "S&P 500")]
    #[case("^GSPC", "S&P 500")]
    #[case("^DJI", "Dow Jones Industrial Average")]
    #[case("^IXIC", "NASDAQ")]
    #[case("^NDX", "NASDAQ 100")]
    #[case("^RUT", "Russell 2000")]
    #[case("^SOX", "PHLX Semiconductor Sector")]
    #[case("^HSI", "Unknown")]
    fn test_index_name(#[case] symbol: &str, #[case] expected: &str) {
        assert_eq!(index_name(symbol), expected);
    }

    #[test]
    fn test_constituents() {
        assert!(StockIndex::Djia.tickers().contains(&"MSFT"));
        assert!(StockIndex::Sox.tickers().contains(&"TSM"));
        assert_eq!(StockIndex::Sp500.name(), "S&P 500");
    }
}
