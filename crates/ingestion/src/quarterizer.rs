//! Monthly to quarterly aggregation.
//!
//! Each quarter column is the row-wise mean of that quarter's month columns,
//! ignoring missing months.

use housing_core::{
    HousingConfig, MonthlyPrices, Quarter, QuarterlyPrices, QuarterlyRow, Result,
};
use std::path::Path;
use tracing::debug;

use crate::housing::load_monthly_prices;

/// Running mean for one quarter cell.
#[derive(Debug, Clone, Copy, Default)]
struct QuarterInProgress {
    sum: f64,
    count: u32,
}

impl QuarterInProgress {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum / self.count as f64)
        } else {
            None
        }
    }
}

/// Aggregates a monthly price table into contiguous quarter columns.
pub struct Quarterizer {
    first: Quarter,
    last: Quarter,
    /// Column offset of every source month.
    month_slots: Vec<usize>,
    width: usize,
}

impl Quarterizer {
    /// Plan the month-to-quarter mapping for a table. Returns `None` when
    /// the table has no month columns.
    pub fn for_table(prices: &MonthlyPrices) -> Option<Self> {
        let first = prices.months.iter().map(|m| m.quarter()).min()?;
        let last = prices.months.iter().map(|m| m.quarter()).max()?;
        let month_slots = prices
            .months
            .iter()
            .map(|m| (m.quarter().ordinal() - first.ordinal()) as usize)
            .collect();
        Some(Self {
            first,
            last,
            month_slots,
            width: (last.ordinal() - first.ordinal() + 1) as usize,
        })
    }

    /// Quarter columns produced, first to last inclusive.
    pub fn quarters(&self) -> Vec<Quarter> {
        self.first.range_inclusive(self.last).collect()
    }

    /// Aggregate one row of monthly values.
    pub fn quarterize_row(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut cells = vec![QuarterInProgress::default(); self.width];
        for (&slot, &value) in self.month_slots.iter().zip(values) {
            cells[slot].add(value);
        }
        cells.iter().map(QuarterInProgress::mean).collect()
    }

    /// Aggregate the whole table. Row order is preserved.
    pub fn quarterize(&self, prices: &MonthlyPrices) -> Result<QuarterlyPrices> {
        let rows = prices
            .rows
            .iter()
            .map(|row| QuarterlyRow {
                town: row.town.clone(),
                values: self.quarterize_row(&row.values),
            })
            .collect();
        QuarterlyPrices::new(self.quarters(), rows)
    }
}

/// Quarterize a monthly table. A table without month columns yields an empty
/// quarterly table with the same rows.
pub fn quarterize(prices: &MonthlyPrices) -> Result<QuarterlyPrices> {
    match Quarterizer::for_table(prices) {
        Some(q) => {
            let table = q.quarterize(prices)?;
            let (rows, cols) = table.shape();
            debug!(
                "quarterized {} months into {} quarters ({} rows x {} columns)",
                prices.months.len(),
                cols - 2,
                rows,
                cols
            );
            Ok(table)
        }
        None => {
            let rows = prices
                .rows
                .iter()
                .map(|row| QuarterlyRow {
                    town: row.town.clone(),
                    values: Vec::new(),
                })
                .collect();
            QuarterlyPrices::new(Vec::new(), rows)
        }
    }
}

/// Load a monthly housing CSV and quarterize it.
pub fn load_quarterly_prices(path: &Path, config: &HousingConfig) -> Result<QuarterlyPrices> {
    quarterize(&load_monthly_prices(path, config)?)
}
