#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod industry;
pub mod rating;
pub mod record;

pub use error::RatingError;
pub use frame::{industries_to_frame, percentile_column, securities_to_frame};
pub use industry::{Aggregation, DEFAULT_INDUSTRY_COLUMNS, SecurityColumn, aggregate_by_industry};
pub use rating::{Rating, RatingMethod, RatingSet, rate, rate_horizon};
pub use record::{
    IndustryRecord, Rated, SecurityRecord, apply_ratings, sort_by_current_strength, sort_by_strength,
};
