use serde::{Deserialize, Serialize};

//holding in the single tradable instrument
//long-only, so flat and long are the only states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long { shares: u64 },
}

impl Position {
    //opens a long position, a zero share count stays flat
    pub fn long(shares: u64) -> Self {
        if shares == 0 {
            Position::Flat
        } else {
            Position::Long { shares }
        }
    }

    //returns the number of shares held
    pub fn shares(&self) -> u64 {
        match self {
            Position::Flat => 0,
            Position::Long { shares } => *shares,
        }
    }

    //returns true if the position is flat (no open position)
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    //returns true if the position is long
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    //market value at a given price
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares() as f64 * price
    }
}
