use crate::error::{BacktestError, Result};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

//validated daily close series, dates ascending
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<String>,
    closes: Vec<f64>,
}

impl PriceSeries {
    //creates a series, rejecting anything that breaks the loader contract
    pub fn new(dates: Vec<String>, closes: Vec<f64>) -> Result<Self> {
        if closes.is_empty() {
            return Err(BacktestError::invalid_input("price series is empty"));
        }

        if dates.len() != closes.len() {
            return Err(BacktestError::invalid_input(format!(
                "dates ({}) and closes ({}) differ in length",
                dates.len(),
                closes.len()
            )));
        }

        if let Some(i) = closes.iter().position(|c| !c.is_finite()) {
            return Err(BacktestError::invalid_input(format!(
                "close at row {} ({}) is not a finite number",
                i, dates[i]
            )));
        }

        let parsed = dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>>>()?;

        //equal dates are tolerated, going backwards is not
        if let Some(i) = parsed.windows(2).position(|w| w[1] < w[0]) {
            return Err(BacktestError::invalid_input(format!(
                "dates out of order at row {}: {} after {}",
                i + 1,
                dates[i + 1],
                dates[i]
            )));
        }

        Ok(PriceSeries { dates, closes })
    }

    //builds a series from bare closes with synthetic consecutive dates
    pub fn from_closes(closes: Vec<f64>) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .ok_or_else(|| BacktestError::invalid_input("bad synthetic start date"))?;
        let dates = start
            .iter_days()
            .take(closes.len())
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();
        Self::new(dates, closes)
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    //always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn first_date(&self) -> &str {
        &self.dates[0]
    }

    pub fn last_date(&self) -> &str {
        &self.dates[self.dates.len() - 1]
    }

    //returns (min, max) close
    pub fn close_range(&self) -> (f64, f64) {
        self.closes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| BacktestError::invalid_input(format!("invalid date '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(ds: &[&str]) -> Vec<String> {
        ds.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn accepts_valid_series() {
        let series = PriceSeries::new(
            dates(&["2024-01-02", "2024-01-03", "2024-01-04"]),
            vec![10.0, 11.0, 12.0],
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), "2024-01-02");
        assert_eq!(series.last_date(), "2024-01-04");
        assert_eq!(series.close_range(), (10.0, 12.0));
    }

    #[test]
    fn rejects_empty_series() {
        let err = PriceSeries::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidInput(_)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PriceSeries::new(dates(&["2024-01-02"]), vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidInput(_)));
    }

    #[test]
    fn rejects_nan_close() {
        let err = PriceSeries::new(dates(&["2024-01-02", "2024-01-03"]), vec![1.0, f64::NAN])
            .unwrap_err();
        assert!(matches!(err, BacktestError::InvalidInput(_)));
    }

    #[test]
    fn rejects_descending_dates() {
        let err = PriceSeries::new(dates(&["2024-01-03", "2024-01-02"]), vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, BacktestError::InvalidInput(_)));
    }

    #[test]
    fn rejects_malformed_date() {
        let err = PriceSeries::new(dates(&["03/01/2024"]), vec![1.0]).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidInput(_)));
    }

    #[test]
    fn synthetic_dates_are_consecutive() {
        let series = PriceSeries::from_closes(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.dates(), &["2000-01-01", "2000-01-02", "2000-01-03"]);
    }
}
