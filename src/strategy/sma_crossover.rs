use crate::error::{BacktestError, Result};
use crate::indicator::moving_average;
use crate::strategy::{Signal, Strategy};
use log::debug;

//sma crossover strategy
//buys when the fast sma crosses above the slow sma
//sells when the fast sma crosses below the slow sma
#[derive(Debug, Clone)]
pub struct SmaCrossoverStrategy {
    fast_window: usize,
    slow_window: usize,
}

impl SmaCrossoverStrategy {
    pub fn new(fast_window: usize, slow_window: usize) -> Result<Self> {
        if fast_window == 0 || slow_window == 0 {
            return Err(BacktestError::invalid_parameter("windows must be > 0"));
        }
        if fast_window >= slow_window {
            return Err(BacktestError::invalid_parameter(format!(
                "fast window ({}) must be < slow window ({})",
                fast_window, slow_window
            )));
        }

        Ok(SmaCrossoverStrategy {
            fast_window,
            slow_window,
        })
    }

    //checks the sign change of fast - slow between consecutive bars
    fn check_crossover(prev_diff: f64, diff: f64) -> Signal {
        if prev_diff <= 0.0 && diff > 0.0 {
            Signal::Buy
        } else if prev_diff >= 0.0 && diff < 0.0 {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl Strategy for SmaCrossoverStrategy {
    fn generate(&self, closes: &[f64]) -> Result<Vec<Signal>> {
        let fast = moving_average(closes, self.fast_window)?;
        let slow = moving_average(closes, self.slow_window)?;

        let diff: Vec<Option<f64>> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let mut signals = vec![Signal::Hold; closes.len()];
        for i in 1..closes.len() {
            //no prior value means no cross, never a comparison against zero
            if let (Some(prev), Some(cur)) = (diff[i - 1], diff[i]) {
                signals[i] = Self::check_crossover(prev, cur);
            }
        }

        debug!(
            "sma crossover ({}/{}) over {} bars",
            self.fast_window,
            self.slow_window,
            closes.len()
        );
        Ok(signals)
    }

    fn name(&self) -> &str {
        "SMA Crossover"
    }
}
