//! Core data types for the housing analysis.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar quarter. Q1 is January through March, Q4 October through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter {
    year: i32,
    quarter: u8,
}

impl Quarter {
    /// Create a quarter, validating `quarter ∈ 1..=4`.
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(Error::parse(format!("quarter {quarter} out of range 1..=4")));
        }
        Ok(Self { year, quarter })
    }

    /// The first quarter of `year`.
    pub fn first_of(year: i32) -> Self {
        Self { year, quarter: 1 }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn quarter(self) -> u8 {
        self.quarter
    }

    /// Number of quarters since year 0, used for column offsets.
    #[inline]
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 4 + (self.quarter as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(4) as i32,
            quarter: (ordinal.rem_euclid(4) + 1) as u8,
        }
    }

    /// The following quarter.
    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// The preceding quarter.
    pub fn prev(self) -> Self {
        Self::from_ordinal(self.ordinal() - 1)
    }

    /// Every quarter from `self` through `last`, inclusive.
    pub fn range_inclusive(self, last: Quarter) -> impl Iterator<Item = Quarter> {
        (self.ordinal()..=last.ordinal()).map(Self::from_ordinal)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}q{}", self.year, self.quarter)
    }
}

impl FromStr for Quarter {
    type Err = Error;

    /// Accepts `2008q3` or `2008Q3`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, quarter) = s
            .split_once(['q', 'Q'])
            .ok_or_else(|| Error::parse(format!("invalid quarter label '{s}'")))?;
        if year.len() != 4
            || quarter.len() != 1
            || !year.bytes().chain(quarter.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(Error::parse(format!("invalid quarter label '{s}'")));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| Error::parse(format!("invalid year in quarter label '{s}'")))?;
        let quarter: u8 = quarter
            .parse()
            .map_err(|_| Error::parse(format!("invalid quarter in quarter label '{s}'")))?;
        Self::new(year, quarter)
    }
}

impl TryFrom<String> for Quarter {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Quarter> for String {
    fn from(q: Quarter) -> Self {
        q.to_string()
    }
}

/// A calendar month, as found in `YYYY-MM` column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// The quarter containing this month.
    pub fn quarter(self) -> Quarter {
        Quarter {
            year: self.year,
            quarter: ((self.month - 1) / 3 + 1) as u8,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        // Exactly YYYY-MM; chrono would also take YYYY-M.
        if s.len() != 7 {
            return Err(Error::parse(format!("invalid month '{s}'")));
        }
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|e| Error::parse(format!("invalid month '{s}': {e}")))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

/// A (state, region) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Town {
    /// Two-letter code when recognized, else the name as given.
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "RegionName")]
    pub region: String,
}

impl Town {
    pub fn new(state: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            region: region.into(),
        }
    }

    pub fn region_key(&self) -> RegionKey {
        RegionKey::new(&self.region)
    }
}

/// Region name with all whitespace removed; the join key between the
/// university listing and the housing table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey(String);

impl RegionKey {
    pub fn new(region: &str) -> Self {
        Self(region.chars().filter(|c| !c.is_whitespace()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One quarter of GDP, in billions of dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdpRow {
    pub quarter: Quarter,
    /// Current-dollar GDP.
    pub gdp_current: f64,
    /// Chained 2009-dollar GDP.
    pub gdp_chained: f64,
}

/// Quarterly GDP in chronological order.
#[derive(Debug, Clone, Default)]
pub struct GdpSeries {
    rows: Vec<GdpRow>,
}

impl GdpSeries {
    /// Build a series, sorting rows chronologically.
    pub fn new(mut rows: Vec<GdpRow>) -> Self {
        rows.sort_by_key(|r| r.quarter);
        Self { rows }
    }

    pub fn rows(&self) -> &[GdpRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `chained[i] - chained[i-1]`; index 0 has no delta.
    pub fn delta(&self, i: usize) -> Option<f64> {
        if i == 0 || i >= self.rows.len() {
            return None;
        }
        Some(self.rows[i].gdp_chained - self.rows[i - 1].gdp_chained)
    }

    /// All deltas, aligned with the rows.
    pub fn deltas(&self) -> Vec<Option<f64>> {
        (0..self.rows.len()).map(|i| self.delta(i)).collect()
    }
}

/// A located quarter: its row index in the GDP series and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterMarker {
    pub index: usize,
    pub quarter: Quarter,
}

/// Recession timing derived from the GDP series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recession {
    pub start: QuarterMarker,
    pub end: QuarterMarker,
    pub bottom: QuarterMarker,
}

/// Monthly prices for one (state, region).
#[derive(Debug, Clone)]
pub struct MonthlyRow {
    pub town: Town,
    /// Aligned with `MonthlyPrices::months`.
    pub values: Vec<Option<f64>>,
}

/// City-level monthly housing prices.
#[derive(Debug, Clone, Default)]
pub struct MonthlyPrices {
    pub months: Vec<Month>,
    pub rows: Vec<MonthlyRow>,
}

/// Quarterly mean prices for one (state, region).
#[derive(Debug, Clone, Serialize)]
pub struct QuarterlyRow {
    pub town: Town,
    /// Aligned with `QuarterlyPrices::quarters`.
    pub values: Vec<Option<f64>>,
}

/// Housing prices aggregated to contiguous quarter columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuarterlyPrices {
    quarters: Vec<Quarter>,
    rows: Vec<QuarterlyRow>,
}

impl QuarterlyPrices {
    /// `quarters` must be contiguous and ascending; every row must have one
    /// value per quarter.
    pub fn new(quarters: Vec<Quarter>, rows: Vec<QuarterlyRow>) -> Result<Self> {
        if quarters.windows(2).any(|w| w[1] != w[0].next()) {
            return Err(Error::schema("quarter columns are not contiguous"));
        }
        if let Some(row) = rows.iter().find(|r| r.values.len() != quarters.len()) {
            return Err(Error::schema(format!(
                "row {}/{} has {} values for {} quarters",
                row.town.state,
                row.town.region,
                row.values.len(),
                quarters.len()
            )));
        }
        Ok(Self { quarters, rows })
    }

    pub fn quarters(&self) -> &[Quarter] {
        &self.quarters
    }

    pub fn rows(&self) -> &[QuarterlyRow] {
        &self.rows
    }

    /// (row count, column count including the two key columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.quarters.len() + 2)
    }

    /// Column offset of a quarter.
    pub fn column(&self, quarter: Quarter) -> Option<usize> {
        let first = self.quarters.first()?;
        let offset = quarter.ordinal() - first.ordinal();
        if offset < 0 || offset as usize >= self.quarters.len() {
            None
        } else {
            Some(offset as usize)
        }
    }

    /// Price of a row in a quarter; `None` when missing or out of range.
    pub fn price(&self, row: &QuarterlyRow, quarter: Quarter) -> Option<f64> {
        self.column(quarter).and_then(|c| row.values[c])
    }

}
