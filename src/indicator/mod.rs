//! Indicators over a close series.
//!
//! Every function returns a vector aligned index-for-index with its input.
//! `None` marks bars inside the warm-up window where the indicator is not yet
//! computable, which keeps it distinct from a legitimate zero.

pub mod moving_average;
pub mod returns;
pub mod rsi;

pub use moving_average::moving_average;
pub use returns::period_return;
pub use rsi::relative_strength;

//indicator output aligned with the input prices
pub type IndicatorSeries = Vec<Option<f64>>;

//number of leading undefined entries
pub fn warmup_len(series: &[Option<f64>]) -> usize {
    series.iter().take_while(|v| v.is_none()).count()
}
