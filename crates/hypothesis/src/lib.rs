//! Hypothesis testing for the housing analysis.
//!
//! This crate provides:
//! - Independent two-sample t-test (Student and Welch)
//! - University vs non-university town comparison
//! - End-to-end analysis pipeline

pub mod pipeline;
pub mod runner;
pub mod ttest;

pub use pipeline::{Analysis, AnalysisReport};
pub use runner::{
    GroupSummary, HypothesisOutcome, HypothesisRunner, TownGroup, NON_UNIVERSITY_TOWN,
    UNIVERSITY_TOWN,
};
pub use ttest::{TTest, TTestResult};
