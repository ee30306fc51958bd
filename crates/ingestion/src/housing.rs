//! City-level monthly housing price loader.
//!
//! Expects a header row containing the state and region key columns and one
//! `YYYY-MM` column per month. Other columns (region ids, metro, county,
//! size rank) are ignored.

use housing_core::{
    states::normalize_state, Error, HousingConfig, Month, MonthlyPrices, MonthlyRow, Result,
    Town,
};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load monthly prices from a CSV file.
pub fn load_monthly_prices(path: &Path, config: &HousingConfig) -> Result<MonthlyPrices> {
    let file = std::fs::File::open(path)?;
    let prices = read_monthly_prices(file, config)?;
    info!(
        "loaded {} towns x {} months from {}",
        prices.rows.len(),
        prices.months.len(),
        path.display()
    );
    Ok(prices)
}

/// Read monthly prices from CSV.
pub fn read_monthly_prices<R: Read>(reader: R, config: &HousingConfig) -> Result<MonthlyPrices> {
    let first_month: Month = config.first_month.parse().map_err(|_| {
        Error::config(format!("first_month '{}' is not YYYY-MM", config.first_month))
    })?;

    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::schema(format!("housing table has no '{name}' column")))
    };
    let state_col = find(&config.state_column)?;
    let region_col = find(&config.region_column)?;

    let mut month_cols: Vec<(usize, Month)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.parse::<Month>().ok().map(|m| (i, m)))
        .filter(|(_, m)| *m >= first_month)
        .collect();
    month_cols.sort_by_key(|(_, m)| *m);

    if month_cols.is_empty() {
        return Err(Error::schema(format!(
            "housing table has no month columns from {first_month} onward"
        )));
    }
    if let Some(w) = month_cols.windows(2).find(|w| w[0].1 == w[1].1) {
        return Err(Error::schema(format!("duplicate month column {}", w[0].1)));
    }
    debug!(
        "housing months {} to {}",
        month_cols[0].1,
        month_cols[month_cols.len() - 1].1
    );

    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for (i, record) in csv.records().enumerate() {
        let record = record?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let town = Town::new(normalize_state(field(state_col)), field(region_col));
        if !seen.insert(town.clone()) {
            warn!("duplicate housing row for {}/{}", town.state, town.region);
        }

        let values = month_cols
            .iter()
            .map(|&(col, month)| {
                parse_price(field(col)).map_err(|_| {
                    Error::parse(format!(
                        "row {}: price '{}' for {} is not a number",
                        i + 2,
                        field(col),
                        month
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        rows.push(MonthlyRow { town, values });
    }

    Ok(MonthlyPrices {
        months: month_cols.into_iter().map(|(_, m)| m).collect(),
        rows,
    })
}

/// Empty cells are missing.
fn parse_price(field: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    if field.is_empty() {
        Ok(None)
    } else {
        field.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
RegionID,RegionName,State,Metro,1999-12,2000-01,2000-02,2000-03
6181,New York,NY,New York,199000,200000,,202000
12447,Los Angeles,California,Los Angeles,300000,301000,302000,303000
";

    #[test]
    fn test_reads_months_from_first_month() {
        let prices = read_monthly_prices(SAMPLE.as_bytes(), &HousingConfig::default()).unwrap();
        let months: Vec<String> = prices.months.iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2000-01", "2000-02", "2000-03"]);
        assert_eq!(prices.rows.len(), 2);
        assert_eq!(prices.rows[0].values, vec![Some(200000.0), None, Some(202000.0)]);
    }

    #[test]
    fn test_state_names_normalized() {
        let prices = read_monthly_prices(SAMPLE.as_bytes(), &HousingConfig::default()).unwrap();
        assert_eq!(prices.rows[0].town, Town::new("NY", "New York"));
        assert_eq!(prices.rows[1].town, Town::new("CA", "Los Angeles"));
    }

    #[test]
    fn test_missing_key_column_is_schema_error() {
        let text = "RegionName,2000-01\nAnn Arbor,1\n";
        let err = read_monthly_prices(text.as_bytes(), &HousingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(msg) if msg.contains("State")));
    }

    #[test]
    fn test_no_month_columns_is_schema_error() {
        let text = "RegionName,State,1999-12\nAnn Arbor,MI,1\n";
        let err = read_monthly_prices(text.as_bytes(), &HousingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_bad_price_is_parse_error() {
        let text = "RegionName,State,2000-01\nAnn Arbor,MI,abc\n";
        let err = read_monthly_prices(text.as_bytes(), &HousingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_bad_first_month_is_config_error() {
        let config = HousingConfig {
            first_month: "2000".to_string(),
            ..HousingConfig::default()
        };
        let err = read_monthly_prices(SAMPLE.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
