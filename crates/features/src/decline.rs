//! Per-town price decline over the recession.

use housing_core::{DeclineMeasure, Quarter, QuarterlyPrices, QuarterlyRow};

/// Decline from `baseline` to `bottom`. `None` when either price is missing
/// or the measure is not finite (a zero bottom price under `Ratio`).
pub fn decline_value(
    baseline: Option<f64>,
    bottom: Option<f64>,
    measure: DeclineMeasure,
) -> Option<f64> {
    let (baseline, bottom) = (baseline?, bottom?);
    let value = match measure {
        DeclineMeasure::Ratio => baseline / bottom,
        DeclineMeasure::Difference => baseline - bottom,
    };
    value.is_finite().then_some(value)
}

/// Decline values of a group of rows.
#[derive(Debug, Clone, Default)]
pub struct DeclineSample {
    pub values: Vec<f64>,
    /// Rows in the group before filtering.
    pub rows: usize,
}

impl DeclineSample {
    /// Rows dropped for a missing price or a non-finite value.
    pub fn dropped(&self) -> usize {
        self.rows - self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes decline values between two quarter columns of a housing table.
pub struct DeclineCalculator<'a> {
    table: &'a QuarterlyPrices,
    baseline: Quarter,
    bottom: Quarter,
    measure: DeclineMeasure,
}

impl<'a> DeclineCalculator<'a> {
    pub fn new(
        table: &'a QuarterlyPrices,
        baseline: Quarter,
        bottom: Quarter,
        measure: DeclineMeasure,
    ) -> Self {
        Self {
            table,
            baseline,
            bottom,
            measure,
        }
    }

    /// Decline of a single row.
    pub fn row(&self, row: &QuarterlyRow) -> Option<f64> {
        decline_value(
            self.table.price(row, self.baseline),
            self.table.price(row, self.bottom),
            self.measure,
        )
    }

    /// Declines of a group of rows, skipping undefined values.
    pub fn sample<'r>(&self, rows: impl IntoIterator<Item = &'r QuarterlyRow>) -> DeclineSample {
        let mut sample = DeclineSample::default();
        for row in rows {
            sample.rows += 1;
            if let Some(v) = self.row(row) {
                sample.values.push(v);
            }
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use housing_core::Town;

    #[test]
    fn test_ratio_and_difference() {
        assert_relative_eq!(
            decline_value(Some(200.0), Some(160.0), DeclineMeasure::Ratio).unwrap(),
            1.25
        );
        assert_relative_eq!(
            decline_value(Some(200.0), Some(160.0), DeclineMeasure::Difference).unwrap(),
            40.0
        );
    }

    #[test]
    fn test_missing_or_degenerate() {
        assert!(decline_value(None, Some(1.0), DeclineMeasure::Difference).is_none());
        assert!(decline_value(Some(1.0), None, DeclineMeasure::Ratio).is_none());
        assert!(decline_value(Some(1.0), Some(0.0), DeclineMeasure::Ratio).is_none());
        assert_eq!(
            decline_value(Some(1.0), Some(0.0), DeclineMeasure::Difference),
            Some(1.0)
        );
    }

    #[test]
    fn test_sample_drops_missing_rows() {
        let quarters: Vec<Quarter> = Quarter::new(2008, 3)
            .unwrap()
            .range_inclusive(Quarter::new(2009, 2).unwrap())
            .collect();
        let row = |name: &str, start: Option<f64>, bottom: Option<f64>| QuarterlyRow {
            town: Town::new("MI", name),
            values: vec![start, None, None, bottom],
        };
        let table = QuarterlyPrices::new(
            quarters,
            vec![
                row("A", Some(100.0), Some(80.0)),
                row("B", None, Some(80.0)),
                row("C", Some(90.0), None),
                row("D", Some(50.0), Some(40.0)),
            ],
        )
        .unwrap();

        let calc = DeclineCalculator::new(
            &table,
            "2008q3".parse().unwrap(),
            "2009q2".parse().unwrap(),
            DeclineMeasure::Difference,
        );
        let sample = calc.sample(table.rows());
        assert_eq!(sample.rows, 4);
        assert_eq!(sample.values, vec![20.0, 10.0]);
        assert_eq!(sample.dropped(), 2);
        assert!(sample.values.len() <= sample.rows);
    }
}
