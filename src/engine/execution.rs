use serde::{Deserialize, Serialize};
use std::fmt;

//order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

//an executed market order, filled at the bar's close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub index: usize,
    pub date: String,
    pub side: OrderSide,
    pub price: f64,
    pub shares: u64,
    pub cash_after: f64,
}

impl Trade {
    //returns the notional value of the trade
    pub fn notional_value(&self) -> f64 {
        self.price * self.shares as f64
    }
}
