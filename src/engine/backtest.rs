use crate::data::PriceSeries;
use crate::engine::execution::Trade;
use crate::error::{BacktestError, Result};
use crate::metrics::{calculate_equity_curve, EquityPoint, MetricsResult};
use crate::portfolio::{Account, BarSnapshot};
use crate::strategy::{Signal, Strategy};
use log::{debug, info};
use serde::Serialize;

//per-bar account state, aligned with the price series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountCurves {
    pub cash: Vec<f64>,
    pub shares: Vec<u64>,
    pub equity: Vec<f64>,
}

impl AccountCurves {
    fn with_capacity(n: usize) -> Self {
        AccountCurves {
            cash: Vec::with_capacity(n),
            shares: Vec::with_capacity(n),
            equity: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, snapshot: BarSnapshot) {
        self.cash.push(snapshot.cash);
        self.shares.push(snapshot.shares);
        self.equity.push(snapshot.equity);
    }

    pub fn len(&self) -> usize {
        self.equity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equity.is_empty()
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.equity.last().copied()
    }
}

//result of a backtest
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub signals: Vec<Signal>,
    pub curves: AccountCurves,
    pub trades: Vec<Trade>,
    pub metrics: MetricsResult,
}

impl BacktestResult {
    //equity points with drawdown and returns, for export
    pub fn equity_curve(&self, series: &PriceSeries) -> Vec<EquityPoint> {
        calculate_equity_curve(series.dates(), &self.curves.equity)
    }
}

//configuration for a backtest
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_cash: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_cash: 10_000.0,
        }
    }
}

//walks prices and signals in lock-step against a fresh account
pub struct BacktestEngine<'a> {
    series: &'a PriceSeries,
    signals: Vec<Signal>,
    account: Account,
}

impl<'a> BacktestEngine<'a> {
    //creates a new backtest engine
    pub fn new(
        config: &BacktestConfig,
        series: &'a PriceSeries,
        signals: Vec<Signal>,
    ) -> Result<Self> {
        if signals.len() != series.len() {
            return Err(BacktestError::invalid_input(format!(
                "prices ({}) and signals ({}) differ in length",
                series.len(),
                signals.len()
            )));
        }

        let account = Account::new(config.initial_cash)?;

        Ok(BacktestEngine {
            series,
            signals,
            account,
        })
    }

    //generates signals with the strategy, then runs
    pub fn run_strategy(
        config: &BacktestConfig,
        series: &'a PriceSeries,
        strategy: &dyn Strategy,
    ) -> Result<BacktestResult> {
        let signals = strategy.generate(series.closes())?;
        info!("{}: generated {} signals", strategy.name(), signals.len());
        BacktestEngine::new(config, series, signals)?.run()
    }

    //runs the backtest, one bar fully settled before the next
    pub fn run(mut self) -> Result<BacktestResult> {
        let n = self.series.len();
        let mut curves = AccountCurves::with_capacity(n);
        let mut trades = Vec::new();

        let bars = self
            .series
            .dates()
            .iter()
            .zip(self.series.closes())
            .zip(&self.signals)
            .enumerate();

        for (i, ((date, &price), &signal)) in bars {
            let (snapshot, trade) = self.account.apply_bar(i, date, price, signal);

            if let Some(trade) = trade {
                debug!(
                    "{} {} {} shares at {:.2}, cash {:.2}",
                    trade.date, trade.side, trade.shares, trade.price, trade.cash_after
                );
                trades.push(trade);
            }

            curves.push(snapshot);
        }

        let metrics = MetricsResult::from_equity(&curves.equity)?;
        info!(
            "backtest finished: {} bars, {} trades, final equity {:.2}",
            n,
            trades.len(),
            curves.final_equity().unwrap_or(self.account.initial_cash)
        );

        Ok(BacktestResult {
            signals: self.signals,
            curves,
            trades,
            metrics,
        })
    }

    //returns a reference to the account
    pub fn account(&self) -> &Account {
        &self.account
    }
}
