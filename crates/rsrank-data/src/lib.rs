#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod metadata;
pub mod period;
pub mod table;
pub mod yahoo;

pub use cache::{CacheStats, SqliteCache};
pub use error::{DataError, Result};
pub use metadata::{MetadataLookup, SecurityProfile, UNKNOWN};
pub use period::Period;
pub use table::PriceTable;
pub use yahoo::{YahooProfileProvider, YahooQuoteProvider};

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
