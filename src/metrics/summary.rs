use crate::error::{BacktestError, Result};
use crate::metrics::timeseries::{calculate_returns, drawdown_series};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

pub const TRADING_DAYS_PER_YEAR: u32 = 252;

//summary statistics of one completed equity curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl MetricsResult {
    //calculate summary metrics from an equity curve
    pub fn from_equity(equity: &[f64]) -> Result<Self> {
        Ok(MetricsResult {
            total_return: total_return(equity)?,
            max_drawdown: max_drawdown(equity),
            sharpe_ratio: sharpe_ratio(equity, TRADING_DAYS_PER_YEAR),
        })
    }
}

//final over initial equity, minus one
pub fn total_return(equity: &[f64]) -> Result<f64> {
    if equity.len() < 2 {
        return Ok(0.0);
    }

    let first = equity[0];
    if first == 0.0 {
        return Err(BacktestError::DivisionByZero(
            "initial equity is zero, cannot compute return".into(),
        ));
    }

    Ok(equity[equity.len() - 1] / first - 1.0)
}

//deepest fall from a running peak as a non-positive fraction
pub fn max_drawdown(equity: &[f64]) -> f64 {
    drawdown_series(equity).into_iter().fold(0.0, f64::min)
}

//annualised sharpe ratio of bar returns with a zero risk-free rate
pub fn sharpe_ratio(equity: &[f64], periods_per_year: u32) -> f64 {
    if equity.len() < 3 {
        return 0.0;
    }

    let returns = calculate_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.as_slice().mean();
    let std_dev = returns.as_slice().std_dev();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }

    (mean / std_dev) * f64::from(periods_per_year).sqrt()
}
