pub mod account;
pub mod position;

pub use account::{Account, BarSnapshot};
pub use position::Position;
