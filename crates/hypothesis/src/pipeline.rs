//! End-to-end analysis.
//!
//! Loads each input once, derives the recession markers once and hands them
//! to the test runner explicitly.

use crate::runner::{HypothesisOutcome, HypothesisRunner};
use housing_core::{
    Config, Error, GdpSeries, InputPaths, MonthlyPrices, Recession, Result, Town,
};
use housing_features::locate_recession;
use housing_ingestion::{load_gdp, load_monthly_prices, load_university_towns, quarterize};
use serde::Serialize;
use tracing::info;

/// Everything an analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Number of entries in the university listing.
    pub university_towns: usize,
    /// GDP quarters considered.
    pub gdp_quarters: usize,
    pub recession: Recession,
    /// (rows, columns) of the quarterized housing table, key columns included.
    pub housing_shape: (usize, usize),
    pub outcome: HypothesisOutcome,
}

/// Analysis driver.
pub struct Analysis {
    config: Config,
}

impl Analysis {
    /// Create an analysis, validating the configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the three inputs and run.
    pub fn run(&self, paths: &InputPaths) -> Result<AnalysisReport> {
        let towns = load_university_towns(&paths.university_towns)?;
        let gdp = load_gdp(&paths.gdp, &self.config.gdp)?;
        let monthly = load_monthly_prices(&paths.housing, &self.config.housing)?;
        self.run_with(&towns, &gdp, &monthly)
    }

    /// Run on inputs that are already loaded.
    pub fn run_with(
        &self,
        towns: &[Town],
        gdp: &GdpSeries,
        monthly: &MonthlyPrices,
    ) -> Result<AnalysisReport> {
        let recession = locate_recession(gdp).ok_or_else(|| {
            Error::undefined(format!(
                "no complete recession in {} GDP quarters",
                gdp.len()
            ))
        })?;
        info!(
            "recession: start {}, bottom {}, end {}",
            recession.start.quarter, recession.bottom.quarter, recession.end.quarter
        );

        let table = quarterize(monthly)?;
        let outcome = HypothesisRunner::new(self.config.test.clone()).run(
            &table,
            towns,
            &recession,
        )?;

        Ok(AnalysisReport {
            university_towns: towns.len(),
            gdp_quarters: gdp.len(),
            recession,
            housing_shape: table.shape(),
            outcome,
        })
    }
}
