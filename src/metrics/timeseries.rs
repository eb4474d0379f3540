use serde::{Deserialize, Serialize};

//a point in the equity curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: String,
    pub equity: f64,
    //fraction below the running peak, zero or negative
    pub drawdown: f64,
    //bar-over-bar return, empty on the first bar
    pub returns: Option<f64>,
}

//calculates the equity curve with drawdowns
pub fn calculate_equity_curve(dates: &[String], equity_values: &[f64]) -> Vec<EquityPoint> {
    let drawdowns = drawdown_series(equity_values);
    let mut prev_equity: Option<f64> = None;

    dates
        .iter()
        .zip(equity_values)
        .zip(drawdowns)
        .map(|((date, &equity), drawdown)| {
            let returns = prev_equity.map(|prev| (equity - prev) / prev);
            prev_equity = Some(equity);
            EquityPoint {
                date: date.clone(),
                equity,
                drawdown,
                returns,
            }
        })
        .collect()
}

//equity[i] / running peak - 1 for every bar
pub fn drawdown_series(equity_values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    equity_values
        .iter()
        .map(|&equity| {
            peak = peak.max(equity);
            equity / peak - 1.0
        })
        .collect()
}

//calculates returns from equity values, one fewer than the input
pub fn calculate_returns(equity_values: &[f64]) -> Vec<f64> {
    equity_values
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}
