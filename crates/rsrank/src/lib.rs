#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod universe;

// Re-export main types from sub-crates
pub use rsrank_data as data;
pub use rsrank_output as output;
pub use rsrank_rank as rank;
pub use rsrank_strength as strength;

pub use config::RankingConfig;
pub use error::{ConfigError, RankingError};
pub use pipeline::{MarketDataSource, RankingEngine, Rankings, rank_from_data};
pub use universe::{StockIndex, Universe, index_name};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
