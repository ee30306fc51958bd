//! Independent two-sample t-test, two-sided.

use housing_core::{Error, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Test configuration.
#[derive(Debug, Clone, Copy)]
pub struct TTest {
    /// Pooled variance with `n1 + n2 - 2` degrees of freedom when true;
    /// Welch's unequal-variance test otherwise.
    pub equal_variance: bool,
}

/// Test output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TTestResult {
    /// t statistic of `a - b`.
    pub statistic: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    pub mean_a: f64,
    pub mean_b: f64,
}

impl TTest {
    pub fn student() -> Self {
        Self {
            equal_variance: true,
        }
    }

    pub fn welch() -> Self {
        Self {
            equal_variance: false,
        }
    }

    /// Compare the means of `a` and `b`.
    ///
    /// The pooled test needs both samples non-empty and at least three
    /// observations in total; Welch needs two per sample. The samples must
    /// not both be constant.
    pub fn run(&self, a: &[f64], b: &[f64]) -> Result<TTestResult> {
        let enough = if self.equal_variance {
            !a.is_empty() && !b.is_empty() && a.len() + b.len() >= 3
        } else {
            a.len() >= 2 && b.len() >= 2
        };
        if !enough {
            return Err(Error::undefined(format!(
                "{} t-test undefined for group sizes {} and {}",
                if self.equal_variance { "pooled" } else { "Welch" },
                a.len(),
                b.len()
            )));
        }

        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let (mean_a, mean_b) = (a.iter().mean(), b.iter().mean());
        let (var_a, var_b) = (sample_variance(a), sample_variance(b));

        let (se, df) = if self.equal_variance {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * var_a + (n2 - 1.0) * var_b) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        } else {
            let (va, vb) = (var_a / n1, var_b / n2);
            let df = (va + vb).powi(2) / (va.powi(2) / (n1 - 1.0) + vb.powi(2) / (n2 - 1.0));
            ((va + vb).sqrt(), df)
        };

        if !(se > 0.0 && se.is_finite() && df.is_finite()) {
            return Err(Error::undefined(
                "t-test undefined: both groups have zero variance",
            ));
        }

        let statistic = (mean_a - mean_b) / se;
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| Error::undefined(format!("t distribution with df={df}: {e}")))?;
        let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);

        Ok(TTestResult {
            statistic,
            df,
            p_value,
            mean_a,
            mean_b,
        })
    }
}

/// Variance with an `n - 1` denominator. A single observation contributes
/// nothing to the pooled sum of squares, so it is taken as zero.
fn sample_variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        0.0
    } else {
        xs.iter().variance()
    }
}
