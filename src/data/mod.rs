pub mod loader;
pub mod price_series;

pub use loader::load_csv;
pub use price_series::PriceSeries;
