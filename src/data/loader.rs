use crate::data::price_series::{parse_date, PriceSeries};
use crate::error::{BacktestError, Result};
use csv::ReaderBuilder;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: f64,
}

//loads a Date,Close csv file, sorted ascending by date
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BacktestError::invalid_input(format!(
            "CSV not found: {}",
            path.display()
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result.map_err(|e| {
            BacktestError::invalid_input(format!(
                "failed to parse CSV record at line {}: {}",
                index + 2,
                e
            ))
        })?;

        if record.close.is_nan() {
            return Err(BacktestError::invalid_input(format!(
                "Close is NaN at line {}, clean the CSV first",
                index + 2
            )));
        }

        let parsed = parse_date(&record.date)?;
        rows.push((parsed, record.date, record.close));
    }

    if rows.is_empty() {
        return Err(BacktestError::invalid_input(format!(
            "CSV {} has no rows (expected columns Date,Close)",
            path.display()
        )));
    }

    //stable sort keeps file order for repeated dates
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    debug!("sorted {} rows from {}", rows.len(), path.display());

    let (dates, closes): (Vec<String>, Vec<f64>) =
        rows.into_iter().map(|(_, date, close)| (date, close)).unzip();

    let series = PriceSeries::new(dates, closes)?;
    info!(
        "loaded {} bars from {} ({} to {})",
        series.len(),
        path.display(),
        series.first_date(),
        series.last_date()
    );
    Ok(series)
}
