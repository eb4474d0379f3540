pub mod rsi_reversion;
pub mod sma_crossover;

use crate::config::StrategyParams;
use crate::error::{BacktestError, Result};
use rsi_reversion::RsiReversionStrategy;
use serde::{Deserialize, Serialize};
use sma_crossover::SmaCrossoverStrategy;

//discrete trading action for one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    //numeric encoding (buy = +1, sell = -1, hold = 0)
    pub fn as_i8(&self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl TryFrom<i8> for Signal {
    type Error = BacktestError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            1 => Ok(Signal::Buy),
            -1 => Ok(Signal::Sell),
            0 => Ok(Signal::Hold),
            other => Err(BacktestError::invalid_input(format!(
                "signal code {} is not one of -1, 0, 1",
                other
            ))),
        }
    }
}

//strategy interface, turns a close series into one signal per bar
pub trait Strategy: Send + Sync {
    //returns signals aligned index-for-index with closes
    fn generate(&self, closes: &[f64]) -> Result<Vec<Signal>>;

    //returns the strategy name
    fn name(&self) -> &str;
}

//builds the strategy described by the configuration
pub fn build_strategy(params: &StrategyParams) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match params {
        StrategyParams::Crossover(p) => {
            Box::new(SmaCrossoverStrategy::new(p.fast_window, p.slow_window)?)
        }
        StrategyParams::Threshold(p) => Box::new(RsiReversionStrategy::new(
            p.period,
            p.buy_below,
            p.sell_above,
        )?),
    };
    Ok(strategy)
}

//how many bars carry each non-hold action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalCounts {
    pub buys: usize,
    pub sells: usize,
}

impl SignalCounts {
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals
            .iter()
            .fold(SignalCounts::default(), |mut counts, signal| {
                match signal {
                    Signal::Buy => counts.buys += 1,
                    Signal::Sell => counts.sells += 1,
                    Signal::Hold => {}
                }
                counts
            })
    }
}
