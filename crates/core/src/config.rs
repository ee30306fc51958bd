//! Configuration structures for the housing analysis.

use crate::error::{Error, Result};
use crate::types::Quarter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GDP table layout.
    pub gdp: GdpConfig,
    /// Housing table layout.
    pub housing: HousingConfig,
    /// Hypothesis test settings.
    pub test: TestConfig,
}

impl Config {
    /// Load a configuration from a JSON file. Missing sections take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let g = &self.gdp;
        if g.quarter_column == g.current_column
            || g.quarter_column == g.chained_column
            || g.current_column == g.chained_column
        {
            return Err(Error::config("GDP column positions must be distinct"));
        }
        if self.housing.state_column == self.housing.region_column {
            return Err(Error::config("housing key columns must be distinct"));
        }
        if !(self.test.significance > 0.0 && self.test.significance < 1.0) {
            return Err(Error::config(format!(
                "significance {} must be in (0, 1)",
                self.test.significance
            )));
        }
        Ok(())
    }
}

/// Paths of the three input files. Always supplied by the caller.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Quarterly GDP table (CSV).
    pub gdp: PathBuf,
    /// University-town listing (text).
    pub university_towns: PathBuf,
    /// City-level monthly housing prices (CSV).
    pub housing: PathBuf,
}

/// GDP table layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GdpConfig {
    /// Zero-based column holding the quarter label.
    pub quarter_column: usize,
    /// Zero-based column holding current-dollar GDP.
    pub current_column: usize,
    /// Zero-based column holding chained-dollar GDP.
    pub chained_column: usize,
    /// Earlier quarters are dropped at load time.
    pub first_quarter: Quarter,
}

impl Default for GdpConfig {
    fn default() -> Self {
        Self {
            quarter_column: 0,
            current_column: 1,
            chained_column: 2,
            first_quarter: Quarter::first_of(2000),
        }
    }
}

/// Housing table layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingConfig {
    /// Header of the state column.
    pub state_column: String,
    /// Header of the region column.
    pub region_column: String,
    /// Earliest month column to keep, as `YYYY-MM`.
    pub first_month: String,
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self {
            state_column: "State".to_string(),
            region_column: "RegionName".to_string(),
            first_month: "2000-01".to_string(),
        }
    }
}

/// How a town's price loss over the recession is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineMeasure {
    /// `baseline / bottom`, the price ratio named in the hypothesis.
    #[default]
    Ratio,
    /// `baseline - bottom`, an absolute decline.
    Difference,
}

/// Which quarter's price the decline is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// The first quarter of the recession.
    #[default]
    RecessionStart,
    /// The quarter immediately before the recession starts.
    QuarterBeforeStart,
}

/// Hypothesis test configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Decline measure.
    pub measure: DeclineMeasure,
    /// Baseline quarter.
    pub baseline: Baseline,
    /// Student's t-test with pooled variance when true, Welch's otherwise.
    pub equal_variance: bool,
    /// p-value threshold for rejecting the null hypothesis.
    pub significance: f64,
    /// Match university towns on (state, region) instead of region only.
    pub match_state: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            measure: DeclineMeasure::Ratio,
            baseline: Baseline::RecessionStart,
            equal_variance: true,
            significance: 0.01,
            match_state: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gdp.first_quarter.to_string(), "2000q1");
        assert_eq!(config.housing.region_column, "RegionName");
        assert_eq!(config.test.measure, DeclineMeasure::Ratio);
        assert!(config.test.equal_variance);
        assert_eq!(config.test.significance, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"test": {"measure": "difference", "significance": 0.05}}"#)
                .unwrap();
        assert_eq!(config.test.measure, DeclineMeasure::Difference);
        assert_eq!(config.test.significance, 0.05);
        assert!(config.test.equal_variance);
        assert_eq!(config.gdp.chained_column, 2);
    }

    #[test]
    fn test_first_quarter_from_label() {
        let config: Config =
            serde_json::from_str(r#"{"gdp": {"first_quarter": "1990Q2"}}"#).unwrap();
        assert_eq!(config.gdp.first_quarter.to_string(), "1990q2");
    }

    #[test]
    fn test_validate_rejects_bad_significance() {
        let mut config = Config::default();
        config.test.significance = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_shared_columns() {
        let mut config = Config::default();
        config.gdp.chained_column = 1;
        assert!(config.validate().is_err());
    }
}
