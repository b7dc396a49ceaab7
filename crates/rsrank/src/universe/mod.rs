//! Index universes: constituent lists and index names.

pub mod constituents;
pub mod index;

pub use index::{StockIndex, index_name};

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for StockIndex {
    fn symbols(&self) -> Vec<String> {
        self.tickers().iter().map(|t| (*t).to_string()).collect()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.tickers().contains(&symbol)
    }

    fn size(&self) -> usize {
        self.tickers().len()
    }
}
