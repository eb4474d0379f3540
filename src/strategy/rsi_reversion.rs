use crate::error::{BacktestError, Result};
use crate::indicator::relative_strength;
use crate::strategy::{Signal, Strategy};
use log::debug;

//rsi threshold-zone strategy
//buys while rsi is below the oversold level
//sells while rsi is above the overbought level
//the zone is re-checked every bar, so a long oversold run repeats buy
#[derive(Debug, Clone)]
pub struct RsiReversionStrategy {
    period: usize,
    buy_below: f64,
    sell_above: f64,
}

impl RsiReversionStrategy {
    //thresholds are taken as given, their ordering is the caller's concern
    pub fn new(period: usize, buy_below: f64, sell_above: f64) -> Result<Self> {
        if period == 0 {
            return Err(BacktestError::invalid_parameter("rsi period must be > 0"));
        }

        Ok(RsiReversionStrategy {
            period,
            buy_below,
            sell_above,
        })
    }

    fn classify(&self, rsi: Option<f64>) -> Signal {
        match rsi {
            Some(r) if r < self.buy_below => Signal::Buy,
            Some(r) if r > self.sell_above => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}

impl Strategy for RsiReversionStrategy {
    fn generate(&self, closes: &[f64]) -> Result<Vec<Signal>> {
        let rsi = relative_strength(closes, self.period)?;
        let signals: Vec<Signal> = rsi.into_iter().map(|r| self.classify(r)).collect();

        debug!(
            "rsi threshold (period={}, buy<{}, sell>{}) over {} bars",
            self.period,
            self.buy_below,
            self.sell_above,
            closes.len()
        );
        Ok(signals)
    }

    fn name(&self) -> &str {
        "RSI Threshold"
    }
}
