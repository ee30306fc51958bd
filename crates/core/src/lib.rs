//! Core types and configuration for the university-town housing analysis.
//!
//! This crate provides shared types used across all other crates:
//! - Quarter and month labels
//! - GDP series, town records and housing price tables
//! - The state code table
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod states;
pub mod types;

pub use config::{Baseline, Config, DeclineMeasure, GdpConfig, HousingConfig, InputPaths, TestConfig};
pub use error::{Error, Result};
pub use types::*;
