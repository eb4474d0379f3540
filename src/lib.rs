//a Rust-based strategy backtester for daily closing prices

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod portfolio;
pub mod report;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        BacktestConfiguration, RsiParams, SmaParams, StrategyParams, StrategyType,
    };
    pub use crate::data::{load_csv, PriceSeries};
    pub use crate::engine::sweep::{rank_by_sharpe, run_sweep};
    pub use crate::engine::{
        AccountCurves, BacktestConfig, BacktestEngine, BacktestResult, OrderSide, SweepGrid,
        SweepOutcome, Trade,
    };
    pub use crate::error::{BacktestError, Result};
    pub use crate::indicator::{moving_average, period_return, relative_strength};
    pub use crate::metrics::{calculate_equity_curve, EquityPoint, MetricsResult};
    pub use crate::portfolio::{Account, Position};
    pub use crate::strategy::{
        build_strategy, rsi_reversion::RsiReversionStrategy, sma_crossover::SmaCrossoverStrategy,
        Signal, SignalCounts, Strategy,
    };
}
