pub mod backtest;
pub mod execution;
pub mod sweep;

pub use backtest::{AccountCurves, BacktestConfig, BacktestEngine, BacktestResult};
pub use execution::{OrderSide, Trade};
pub use sweep::{SweepGrid, SweepOutcome};
