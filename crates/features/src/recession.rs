//! Recession timing from quarterly GDP.
//!
//! A recession starts with two consecutive quarters of chained-GDP decline
//! and is over once two consecutive quarters of growth have been observed.
//! Comparisons are strict: a flat quarter breaks a run.

use housing_core::{GdpSeries, QuarterMarker, Recession};
use ordered_float::OrderedFloat;
use tracing::debug;

/// Scans a GDP series for recession start, end and bottom.
pub struct RecessionLocator<'a> {
    series: &'a GdpSeries,
    /// `deltas[i] = chained[i] - chained[i-1]`, `None` at 0.
    deltas: Vec<Option<f64>>,
}

impl<'a> RecessionLocator<'a> {
    pub fn new(series: &'a GdpSeries) -> Self {
        Self {
            series,
            deltas: series.deltas(),
        }
    }

    fn marker(&self, index: usize) -> QuarterMarker {
        QuarterMarker {
            index,
            quarter: self.series.rows()[index].quarter,
        }
    }

    /// First `i >= from` where deltas `i` and `i+1` both satisfy `pred`.
    fn find_pair(&self, from: usize, pred: impl Fn(f64) -> bool) -> Option<usize> {
        self.deltas
            .windows(2)
            .enumerate()
            .skip(from)
            .find(|(_, w)| matches!(w, [Some(a), Some(b)] if pred(*a) && pred(*b)))
            .map(|(i, _)| i)
    }

    /// First quarter of the first two-quarter decline.
    pub fn recession_start(&self) -> Option<QuarterMarker> {
        self.find_pair(0, |d| d < 0.0).map(|i| self.marker(i))
    }

    /// The quarter after the second of two consecutive growth quarters that
    /// follow the start. Its index may equal the series length when growth is
    /// confirmed in the last available quarter.
    pub fn recession_end(&self) -> Option<QuarterMarker> {
        let start = self.recession_start()?;
        self.end_after(start)
    }

    fn end_after(&self, start: QuarterMarker) -> Option<QuarterMarker> {
        let i = self.find_pair(start.index + 1, |d| d > 0.0)?;
        Some(QuarterMarker {
            index: i + 2,
            quarter: self.series.rows()[i + 1].quarter.next(),
        })
    }

    /// Lowest chained GDP in `[start, end)`; the earliest quarter wins ties.
    pub fn recession_bottom(&self) -> Option<QuarterMarker> {
        let start = self.recession_start()?;
        let end = self.end_after(start)?;
        self.bottom_between(start, end)
    }

    fn bottom_between(&self, start: QuarterMarker, end: QuarterMarker) -> Option<QuarterMarker> {
        let stop = end.index.min(self.series.len());
        // min_by_key keeps the first of equal minima.
        (start.index..stop)
            .min_by_key(|&i| OrderedFloat(self.series.rows()[i].gdp_chained))
            .map(|i| self.marker(i))
    }

    /// All three markers, or `None` if the series holds no complete recession.
    pub fn locate(&self) -> Option<Recession> {
        let start = self.recession_start()?;
        let end = self.end_after(start)?;
        let bottom = self.bottom_between(start, end)?;
        debug!(
            "recession start {} end {} bottom {}",
            start.quarter, end.quarter, bottom.quarter
        );
        Some(Recession { start, end, bottom })
    }
}

/// Locate the recession in a series.
pub fn locate_recession(series: &GdpSeries) -> Option<Recession> {
    RecessionLocator::new(series).locate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use housing_core::{GdpRow, Quarter};

    fn series(chained: &[f64]) -> GdpSeries {
        let mut quarter = Quarter::new(2000, 1).unwrap();
        let rows = chained
            .iter()
            .map(|&v| {
                let row = GdpRow {
                    quarter,
                    gdp_current: v,
                    gdp_chained: v,
                };
                quarter = quarter.next();
                row
            })
            .collect();
        GdpSeries::new(rows)
    }

    /// Declines at 3,4 (start 3), bottom 5, flat 6, growth at 7 broken by 8,
    /// growth resumes at 9,10 (end = quarter after 10).
    const FIXTURE: &[f64] = &[
        100.0, 101.0, 102.0, 101.0, 99.0, 98.0, 98.0, 98.5, 98.2, 99.0, 100.0, 99.5,
    ];

    #[test]
    fn test_start_is_first_declining_pair() {
        let s = series(FIXTURE);
        let start = RecessionLocator::new(&s).recession_start().unwrap();
        assert_eq!(start.index, 3);
        assert_eq!(start.quarter.to_string(), "2000q4");
    }

    #[test]
    fn test_end_follows_second_growth_quarter() {
        let s = series(FIXTURE);
        let locator = RecessionLocator::new(&s);
        let end = locator.recession_end().unwrap();
        assert_eq!(end.index, 11);
        assert_eq!(end.quarter.to_string(), "2002q4");
        assert!(end.index > locator.recession_start().unwrap().index);
    }

    #[test]
    fn test_bottom_is_minimum_in_window() {
        let s = series(FIXTURE);
        let locator = RecessionLocator::new(&s);
        let bottom = locator.recession_bottom().unwrap();
        assert_eq!(bottom.index, 5);
        let start = locator.recession_start().unwrap().index;
        let end = locator.recession_end().unwrap().index;
        for i in start..end {
            assert!(s.rows()[bottom.index].gdp_chained <= s.rows()[i].gdp_chained);
        }
    }

    #[test]
    fn test_bottom_ties_take_earliest() {
        // 5 and 6 are both 98.0.
        let s = series(FIXTURE);
        assert_eq!(RecessionLocator::new(&s).recession_bottom().unwrap().index, 5);
        let s = series(&[10.0, 9.0, 8.0, 8.0, 9.0, 10.0]);
        let r = locate_recession(&s).unwrap();
        assert_eq!(r.start.index, 1);
        assert_eq!(r.bottom.index, 2);
    }

    #[test]
    fn test_no_recession_all_positive() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let locator = RecessionLocator::new(&s);
        assert!(locator.recession_start().is_none());
        assert!(locator.recession_end().is_none());
        assert!(locator.recession_bottom().is_none());
        assert!(locator.locate().is_none());
    }

    #[test]
    fn test_no_recession_all_flat() {
        let s = series(&[5.0; 8]);
        assert!(RecessionLocator::new(&s).recession_start().is_none());
    }

    #[test]
    fn test_flat_quarter_breaks_decline_run() {
        let s = series(&[5.0, 4.0, 4.0, 3.0, 3.5]);
        assert!(RecessionLocator::new(&s).recession_start().is_none());
    }

    #[test]
    fn test_start_without_recovery() {
        let s = series(&[5.0, 4.0, 3.0, 3.5, 3.0]);
        let locator = RecessionLocator::new(&s);
        assert_eq!(locator.recession_start().unwrap().index, 1);
        assert!(locator.recession_end().is_none());
        assert!(locator.recession_bottom().is_none());
    }

    #[test]
    fn test_growth_confirmed_in_last_quarter() {
        let s = series(&[5.0, 4.0, 3.0, 3.5, 4.0]);
        let r = locate_recession(&s).unwrap();
        assert_eq!(r.end.index, 5);
        assert_eq!(r.end.quarter.to_string(), "2001q2");
        assert_eq!(r.bottom.index, 2);
    }

    #[test]
    fn test_short_series() {
        assert!(locate_recession(&series(&[])).is_none());
        assert!(locate_recession(&series(&[1.0])).is_none());
        assert!(locate_recession(&series(&[2.0, 1.0])).is_none());
    }
}
