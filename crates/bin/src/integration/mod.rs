//! Integration of the ranking engine with Yahoo Finance and the local cache.

pub(crate) mod cache_manager;
pub(crate) mod data_pipeline;
