use crate::data::PriceSeries;
use crate::engine::backtest::{BacktestConfig, BacktestEngine};
use crate::error::{BacktestError, Result};
use crate::metrics::MetricsResult;
use crate::strategy::sma_crossover::SmaCrossoverStrategy;
use indexmap::IndexMap;
use log::info;
use rayon::prelude::*;
use std::ops::RangeInclusive;

//grid of crossover windows to try
#[derive(Debug, Clone)]
pub struct SweepGrid {
    pub fast: RangeInclusive<usize>,
    pub slow: RangeInclusive<usize>,
}

impl SweepGrid {
    //valid (fast, slow) pairs in grid order
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.fast
            .clone()
            .flat_map(|fast| {
                self.slow
                    .clone()
                    .filter(move |&slow| fast > 0 && fast < slow)
                    .map(move |slow| (fast, slow))
            })
            .collect()
    }
}

//summary of one run in the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    pub metrics: MetricsResult,
    pub trades: usize,
    pub final_equity: f64,
}

//runs every crossover pair independently, each with its own account
pub fn run_sweep(
    config: &BacktestConfig,
    series: &PriceSeries,
    grid: &SweepGrid,
) -> Result<IndexMap<(usize, usize), SweepOutcome>> {
    let pairs = grid.pairs();
    if pairs.is_empty() {
        return Err(BacktestError::invalid_parameter(format!(
            "sweep grid fast={:?} slow={:?} has no pair with fast < slow",
            grid.fast, grid.slow
        )));
    }

    info!("sweeping {} crossover pairs", pairs.len());

    let outcomes = pairs
        .par_iter()
        .map(|&(fast, slow)| {
            let strategy = SmaCrossoverStrategy::new(fast, slow)?;
            let result = BacktestEngine::run_strategy(config, series, &strategy)?;
            let outcome = SweepOutcome {
                metrics: result.metrics,
                trades: result.trades.len(),
                final_equity: result.curves.final_equity().unwrap_or(config.initial_cash),
            };
            Ok(((fast, slow), outcome))
        })
        .collect::<Result<Vec<_>>>()?;

    //collect keeps the grid order of the parallel iterator
    Ok(outcomes.into_iter().collect())
}

//outcomes sorted by sharpe ratio, best first
pub fn rank_by_sharpe(
    outcomes: &IndexMap<(usize, usize), SweepOutcome>,
) -> Vec<((usize, usize), SweepOutcome)> {
    let mut ranked: Vec<_> = outcomes.iter().map(|(k, v)| (*k, *v)).collect();
    ranked.sort_by(|a, b| b.1.metrics.sharpe_ratio.total_cmp(&a.1.metrics.sharpe_ratio));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> PriceSeries {
        let closes = (0..120)
            .map(|i| 100.0 + 10.0 * ((i as f64) / 6.0).sin() + i as f64 * 0.1)
            .collect();
        PriceSeries::from_closes(closes).unwrap()
    }

    #[test]
    fn pairs_skip_inverted_windows() {
        let grid = SweepGrid {
            fast: 2..=4,
            slow: 3..=4,
        };
        assert_eq!(grid.pairs(), vec![(2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn empty_grid_rejected() {
        let grid = SweepGrid {
            fast: 5..=6,
            slow: 2..=3,
        };
        let err = run_sweep(&BacktestConfig::default(), &zigzag(), &grid).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidParameter(_)));
    }

    #[test]
    fn sweep_matches_individual_runs() {
        let series = zigzag();
        let config = BacktestConfig::default();
        let grid = SweepGrid {
            fast: 2..=5,
            slow: 8..=12,
        };

        let outcomes = run_sweep(&config, &series, &grid).unwrap();
        assert_eq!(outcomes.len(), 20);
        assert_eq!(outcomes.keys().next(), Some(&(2, 8)));

        let strategy = SmaCrossoverStrategy::new(3, 10).unwrap();
        let single = BacktestEngine::run_strategy(&config, &series, &strategy).unwrap();
        let swept = outcomes[&(3, 10)];
        assert_eq!(swept.metrics, single.metrics);
        assert_eq!(swept.trades, single.trades.len());
    }

    #[test]
    fn ranking_is_descending() {
        let outcomes = run_sweep(
            &BacktestConfig::default(),
            &zigzag(),
            &SweepGrid {
                fast: 2..=4,
                slow: 6..=9,
            },
        )
        .unwrap();

        let ranked = rank_by_sharpe(&outcomes);
        assert_eq!(ranked.len(), outcomes.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].1.metrics.sharpe_ratio >= pair[1].1.metrics.sharpe_ratio);
        }
    }
}
