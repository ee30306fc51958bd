//! University-town hypothesis test.
//!
//! Splits the quarterized housing table into university and non-university
//! towns, measures each town's price decline from the baseline quarter to the
//! recession bottom, and compares the two groups with a t-test.

use crate::ttest::{TTest, TTestResult};
use housing_core::{
    Baseline, DeclineMeasure, Error, Quarter, QuarterlyPrices, QuarterlyRow, Recession,
    RegionKey, Result, TestConfig, Town,
};
use housing_features::{DeclineCalculator, DeclineSample};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Label of the university-town group.
pub const UNIVERSITY_TOWN: &str = "university town";
/// Label of the non-university-town group.
pub const NON_UNIVERSITY_TOWN: &str = "non-university town";

/// One side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TownGroup {
    #[serde(rename = "university town")]
    University,
    #[serde(rename = "non-university town")]
    NonUniversity,
}

impl TownGroup {
    pub fn label(self) -> &'static str {
        match self {
            TownGroup::University => UNIVERSITY_TOWN,
            TownGroup::NonUniversity => NON_UNIVERSITY_TOWN,
        }
    }
}

/// Size and mean decline of one group.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupSummary {
    /// Rows in the group.
    pub rows: usize,
    /// Rows with a defined decline value.
    pub observations: usize,
    /// Mean decline value.
    pub mean: f64,
}

/// Test result.
#[derive(Debug, Clone, Serialize)]
pub struct HypothesisOutcome {
    /// Null hypothesis rejected at the configured significance.
    pub different: bool,
    /// Exact two-sided p-value.
    pub p_value: f64,
    /// Group with the lower mean decline.
    pub better: TownGroup,
    pub baseline: Quarter,
    pub bottom: Quarter,
    pub measure: DeclineMeasure,
    pub university: GroupSummary,
    pub non_university: GroupSummary,
    pub test: TTestResult,
}

impl HypothesisOutcome {
    /// `(different, p_value, better)`.
    pub fn as_tuple(&self) -> (bool, f64, &'static str) {
        (self.different, self.p_value, self.better.label())
    }
}

/// Membership test against the university listing, on normalized keys.
struct UniversityIndex {
    regions: HashSet<RegionKey>,
    towns: HashSet<(String, RegionKey)>,
    match_state: bool,
}

impl UniversityIndex {
    fn new(towns: &[Town], match_state: bool) -> Self {
        Self {
            regions: towns.iter().map(Town::region_key).collect(),
            towns: towns
                .iter()
                .map(|t| (t.state.clone(), t.region_key()))
                .collect(),
            match_state,
        }
    }

    fn contains(&self, town: &Town) -> bool {
        if self.match_state {
            self.towns.contains(&(town.state.clone(), town.region_key()))
        } else {
            self.regions.contains(&town.region_key())
        }
    }
}

/// Runs the hypothesis test.
pub struct HypothesisRunner {
    config: TestConfig,
}

impl HypothesisRunner {
    pub fn new(config: TestConfig) -> Self {
        Self { config }
    }

    /// Quarter the decline is measured from.
    pub fn baseline_quarter(&self, recession: &Recession) -> Quarter {
        match self.config.baseline {
            Baseline::RecessionStart => recession.start.quarter,
            Baseline::QuarterBeforeStart => recession.start.quarter.prev(),
        }
    }

    pub fn run(
        &self,
        table: &QuarterlyPrices,
        university_towns: &[Town],
        recession: &Recession,
    ) -> Result<HypothesisOutcome> {
        let baseline = self.baseline_quarter(recession);
        let bottom = recession.bottom.quarter;
        for quarter in [baseline, bottom] {
            if table.column(quarter).is_none() {
                return Err(Error::schema(format!(
                    "housing table has no {quarter} column"
                )));
            }
        }

        let index = UniversityIndex::new(university_towns, self.config.match_state);
        let (university, non_university): (Vec<&QuarterlyRow>, Vec<&QuarterlyRow>) = table
            .rows()
            .iter()
            .partition(|row| index.contains(&row.town));

        let calc = DeclineCalculator::new(table, baseline, bottom, self.config.measure);
        let univ = calc.sample(university);
        let non_univ = calc.sample(non_university);
        debug!(
            "university towns: {} rows, {} dropped; others: {} rows, {} dropped",
            univ.rows,
            univ.dropped(),
            non_univ.rows,
            non_univ.dropped()
        );

        for (sample, group) in [
            (&univ, TownGroup::University),
            (&non_univ, TownGroup::NonUniversity),
        ] {
            if sample.is_empty() {
                return Err(Error::undefined(format!(
                    "no {} has prices for both {} and {}",
                    group.label(),
                    baseline,
                    bottom
                )));
            }
        }

        let ttest = if self.config.equal_variance {
            TTest::student()
        } else {
            TTest::welch()
        };
        let result = ttest.run(&univ.values, &non_univ.values)?;

        // Lower mean decline is the smaller loss; ties favour university towns.
        let better = if result.mean_a <= result.mean_b {
            TownGroup::University
        } else {
            TownGroup::NonUniversity
        };

        let outcome = HypothesisOutcome {
            different: result.p_value < self.config.significance,
            p_value: result.p_value,
            better,
            baseline,
            bottom,
            measure: self.config.measure,
            university: summary(&univ, result.mean_a),
            non_university: summary(&non_univ, result.mean_b),
            test: result,
        };
        info!(
            "t={:.4} df={:.1} p={:.6}: different={} better={}",
            result.statistic,
            result.df,
            result.p_value,
            outcome.different,
            better.label()
        );
        Ok(outcome)
    }
}

fn summary(sample: &DeclineSample, mean: f64) -> GroupSummary {
    GroupSummary {
        rows: sample.rows,
        observations: sample.values.len(),
        mean,
    }
}
