use crate::error::{BacktestError, Result};
use crate::indicator::IndicatorSeries;

//wilder-smoothed running averages of gains and losses
#[derive(Debug, Clone, Copy, PartialEq)]
struct WilderState {
    avg_gain: f64,
    avg_loss: f64,
}

impl WilderState {
    //seed from plain means of the first `period` deltas
    fn seed(deltas: &[f64]) -> Self {
        let n = deltas.len() as f64;
        WilderState {
            avg_gain: deltas.iter().map(|d| gain(*d)).sum::<f64>() / n,
            avg_loss: deltas.iter().map(|d| loss(*d)).sum::<f64>() / n,
        }
    }

    fn advance(self, delta: f64, period: usize) -> Self {
        let p = period as f64;
        WilderState {
            avg_gain: (self.avg_gain * (p - 1.0) + gain(delta)) / p,
            avg_loss: (self.avg_loss * (p - 1.0) + loss(delta)) / p,
        }
    }

    fn value(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
    }
}

fn gain(delta: f64) -> f64 {
    delta.max(0.0)
}

fn loss(delta: f64) -> f64 {
    (-delta).max(0.0)
}

//relative strength index with wilder smoothing
//first defined value sits at index `period`
pub fn relative_strength(prices: &[f64], period: usize) -> Result<IndicatorSeries> {
    if period == 0 {
        return Err(BacktestError::invalid_parameter("period must be > 0"));
    }

    let mut out = vec![None; prices.len()];
    if prices.len() <= period {
        return Ok(out);
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let mut state = WilderState::seed(&deltas[..period]);
    out[period] = Some(state.value());

    //deltas[i - 1] is the move into bar i
    for i in period + 1..prices.len() {
        state = state.advance(deltas[i - 1], period);
        out[i] = Some(state.value());
    }

    Ok(out)
}
