//! Yahoo Finance data providers.

pub mod profile;
pub mod quotes;

pub use profile::{YahooProfileProvider, parse_profile};
pub use quotes::YahooQuoteProvider;
