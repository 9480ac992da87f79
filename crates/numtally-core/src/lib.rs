//! Core library for numtally.
//!
//! This crate provides:
//! - Text sources (HTTP download, local file, fixed string)
//! - Numeric token extraction with thousands-separator handling
//! - Count/sum aggregation and report rendering

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod source;

pub use error::{FetchError, NumtallyError, Result};
pub use extract::{NumberExtractor, NumericToken, extract_numbers};
pub use models::config::{BASE_PAGE_URL, NumtallyConfig, SCRIPT_URL};
pub use models::report::{Aggregate, Outcome, Report, SumDisplay};
pub use source::{FileSource, StaticSource, TextSource};
#[cfg(feature = "http")]
pub use source::HttpSource;
