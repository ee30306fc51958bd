//! Derived features for the housing analysis.
//!
//! This crate handles:
//! - Recession start, end and bottom from quarterly GDP
//! - Per-town price decline between two quarters

pub mod decline;
pub mod recession;

pub use decline::{decline_value, DeclineCalculator, DeclineSample};
pub use recession::{locate_recession, RecessionLocator};
