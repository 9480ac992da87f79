//! Data models: configuration and reports.

pub mod config;
pub mod report;

pub use config::NumtallyConfig;
pub use report::{Aggregate, Outcome, Report, SumDisplay};
