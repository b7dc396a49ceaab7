#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;

pub use export::{
    ExportError, ExportFormat, Exporter, IndustryRow, SecurityRow, TableKind, export_file_name,
};
pub use report::{RankingReport, ReportBuilder, ReportError};
