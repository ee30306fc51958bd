//! Data ingestion and normalization for the housing analysis.
//!
//! This crate handles:
//! - University-town listing parsing
//! - Quarterly GDP loading
//! - Monthly housing price loading
//! - Month-to-quarter aggregation

pub mod gdp;
pub mod housing;
pub mod quarterizer;
pub mod university;

pub use gdp::{load_gdp, read_gdp};
pub use housing::{load_monthly_prices, read_monthly_prices};
pub use quarterizer::{load_quarterly_prices, quarterize, Quarterizer};
pub use university::{load_university_towns, parse_university_towns};
