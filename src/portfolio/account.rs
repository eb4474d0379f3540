use crate::engine::execution::{OrderSide, Trade};
use crate::error::{BacktestError, Result};
use crate::portfolio::position::Position;
use crate::strategy::Signal;
use log::debug;

//cash, shares and equity recorded at the close of one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSnapshot {
    pub cash: f64,
    pub shares: u64,
    pub equity: f64,
}

//cash account trading one instrument, all-in on buy and all-out on sell
#[derive(Debug, Clone)]
pub struct Account {
    //initial account balance
    pub initial_cash: f64,

    //cash left after the last fill
    pub cash: f64,

    //current holding
    pub position: Position,
}

impl Account {
    //creates a flat account holding only cash
    pub fn new(initial_cash: f64) -> Result<Self> {
        if initial_cash.is_nan() || initial_cash <= 0.0 {
            return Err(BacktestError::invalid_input(format!(
                "initial cash must be > 0, got {}",
                initial_cash
            )));
        }

        Ok(Account {
            initial_cash,
            cash: initial_cash,
            position: Position::Flat,
        })
    }

    pub fn shares(&self) -> u64 {
        self.position.shares()
    }

    //returns total equity at a given price
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.position.market_value(price)
    }

    //settles one bar at its close and returns the trade if one executed
    pub fn apply_bar(
        &mut self,
        index: usize,
        date: &str,
        price: f64,
        signal: Signal,
    ) -> (BarSnapshot, Option<Trade>) {
        let trade = match (self.position, signal) {
            (Position::Flat, Signal::Buy) => self.buy_all(index, date, price),
            (Position::Long { shares }, Signal::Sell) => {
                Some(self.sell_all(index, date, price, shares))
            }
            //flat+sell, long+buy and hold leave the account untouched
            _ => None,
        };

        let snapshot = BarSnapshot {
            cash: self.cash,
            shares: self.shares(),
            equity: self.equity(price),
        };
        (snapshot, trade)
    }

    //spends as much cash as whole shares allow, a no-op if not even one fits
    fn buy_all(&mut self, index: usize, date: &str, price: f64) -> Option<Trade> {
        if price.is_nan() || price <= 0.0 {
            return None;
        }

        let mut buyable = (self.cash / price).floor() as u64;
        //the quotient can round up onto an integer the cash does not cover
        if buyable > 0 && buyable as f64 * price > self.cash {
            buyable -= 1;
        }
        if buyable == 0 {
            debug!(
                "bar {}: cash {:.2} cannot buy one share at {}",
                index, self.cash, price
            );
            return None;
        }

        self.cash -= buyable as f64 * price;
        self.position = Position::long(buyable);

        Some(Trade {
            index,
            date: date.to_string(),
            side: OrderSide::Buy,
            price,
            shares: buyable,
            cash_after: self.cash,
        })
    }

    //liquidates the whole position
    fn sell_all(&mut self, index: usize, date: &str, price: f64, shares: u64) -> Trade {
        self.cash += shares as f64 * price;
        self.position = Position::Flat;

        Trade {
            index,
            date: date.to_string(),
            side: OrderSide::Sell,
            price,
            shares,
            cash_after: self.cash,
        }
    }

    //returns the total return against the starting cash
    pub fn total_return(&self, price: f64) -> f64 {
        (self.equity(price) - self.initial_cash) / self.initial_cash
    }
}
