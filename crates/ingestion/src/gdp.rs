//! Quarterly GDP loader.
//!
//! Reads a CSV export of the BEA GDP table. Title, note and blank rows are
//! tolerated: any record whose label column is not a quarter label is skipped.

use housing_core::{Error, GdpConfig, GdpRow, GdpSeries, Quarter, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load the GDP series from a CSV file.
pub fn load_gdp(path: &Path, config: &GdpConfig) -> Result<GdpSeries> {
    let file = std::fs::File::open(path)?;
    let series = read_gdp(file, config)?;
    info!(
        "loaded {} GDP quarters from {} ({} to {})",
        series.len(),
        path.display(),
        series.rows()[0].quarter,
        series.rows()[series.len() - 1].quarter
    );
    Ok(series)
}

/// Read the GDP series, keeping quarters at or after `config.first_quarter`.
pub fn read_gdp<R: Read>(reader: R, config: &GdpConfig) -> Result<GdpSeries> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let required = config
        .quarter_column
        .max(config.current_column)
        .max(config.chained_column)
        + 1;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    let mut before_first = 0usize;

    for (i, record) in csv.records().enumerate() {
        let record = record?;
        let quarter = match record
            .get(config.quarter_column)
            .and_then(|label| label.parse::<Quarter>().ok())
        {
            Some(q) => q,
            None => {
                skipped += 1;
                continue;
            }
        };

        if record.len() < required {
            return Err(Error::schema(format!(
                "GDP record {} ({}) has {} columns, expected at least {}",
                i + 1,
                quarter,
                record.len(),
                required
            )));
        }

        if quarter < config.first_quarter {
            before_first += 1;
            continue;
        }

        rows.push(GdpRow {
            quarter,
            gdp_current: parse_amount(&record[config.current_column], quarter)?,
            gdp_chained: parse_amount(&record[config.chained_column], quarter)?,
        });
    }

    debug!(
        "GDP: {} rows kept, {} before {}, {} non-quarter rows skipped",
        rows.len(),
        before_first,
        config.first_quarter,
        skipped
    );

    if rows.is_empty() {
        return Err(Error::schema(format!(
            "no GDP rows at or after {}",
            config.first_quarter
        )));
    }

    let series = GdpSeries::new(rows);
    if let Some(w) = series
        .rows()
        .windows(2)
        .find(|w| w[0].quarter == w[1].quarter)
    {
        return Err(Error::schema(format!("duplicate GDP quarter {}", w[0].quarter)));
    }
    Ok(series)
}

/// Parse a dollar amount, allowing thousands separators.
fn parse_amount(field: &str, quarter: Quarter) -> Result<f64> {
    let cleaned: String = field.chars().filter(|&c| c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(format!("GDP value '{field}' for {quarter} is not a number")))
}
