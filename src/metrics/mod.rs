pub mod summary;
pub mod timeseries;

pub use summary::{max_drawdown, sharpe_ratio, total_return, MetricsResult};
pub use timeseries::{calculate_equity_curve, EquityPoint};
