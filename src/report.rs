//! Plain-text and CSV renderings of a finished backtest.
//!
//! Nothing here feeds back into the pipeline, the tables and files are built
//! from the read-only result structs.

use crate::data::PriceSeries;
use crate::engine::{BacktestResult, SweepOutcome, Trade};
use crate::error::Result;
use crate::indicator::{moving_average, period_return};
use crate::metrics::{EquityPoint, MetricsResult};
use crate::strategy::SignalCounts;
use csv::Writer;
use prettytable::{Cell, Row, Table};
use std::path::Path;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn metric_row(table: &mut Table, name: &str, value: String) {
    table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
}

//backtest summary: cash in, equity out, activity
pub fn summary_table(initial_cash: f64, counts: SignalCounts, result: &BacktestResult) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Summary"), Cell::new("Value")]));

    metric_row(&mut table, "Initial Cash", format!("${:.2}", initial_cash));
    metric_row(
        &mut table,
        "Final Equity",
        format!("${:.2}", result.curves.final_equity().unwrap_or(initial_cash)),
    );
    metric_row(&mut table, "BUY Signals", counts.buys.to_string());
    metric_row(&mut table, "SELL Signals", counts.sells.to_string());
    metric_row(&mut table, "Trades", result.trades.len().to_string());

    table
}

//prints metrics in a formatted table
pub fn metrics_table(metrics: &MetricsResult) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    metric_row(
        &mut table,
        "Total Return",
        format!("{:.2}%", metrics.total_return * 100.0),
    );
    metric_row(
        &mut table,
        "Max Drawdown",
        format!("{:.2}%", metrics.max_drawdown * 100.0),
    );
    metric_row(&mut table, "Sharpe Ratio", format!("{:.2}", metrics.sharpe_ratio));

    table
}

pub fn trades_table(trades: &[Trade]) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Date"),
        Cell::new("Side"),
        Cell::new("Price"),
        Cell::new("Shares"),
        Cell::new("Cash After"),
    ]));

    for trade in trades {
        table.add_row(Row::new(vec![
            Cell::new(&trade.date),
            Cell::new(&trade.side.to_string()),
            Cell::new(&format!("{:.2}", trade.price)),
            Cell::new(&trade.shares.to_string()),
            Cell::new(&format!("{:.2}", trade.cash_after)),
        ]));
    }

    table
}

//last `rows` bars with the derived columns side by side
pub fn preview_table(
    series: &PriceSeries,
    result: &BacktestResult,
    rsi: Option<&[Option<f64>]>,
    rows: usize,
) -> Result<Table> {
    let closes = series.closes();
    let sma3 = moving_average(closes, 3)?;
    let returns = period_return(closes);

    let mut header = vec![
        Cell::new("Date"),
        Cell::new("Close"),
        Cell::new("SMA(3)"),
        Cell::new("Return"),
        Cell::new("Signal"),
        Cell::new("Shares"),
        Cell::new("Equity"),
    ];
    if rsi.is_some() {
        header.push(Cell::new("RSI"));
    }

    let mut table = Table::new();
    table.add_row(Row::new(header));

    let start = series.len().saturating_sub(rows);
    for i in start..series.len() {
        let mut cells = vec![
            Cell::new(&series.dates()[i]),
            Cell::new(&format!("{:.2}", closes[i])),
            Cell::new(&fmt_opt(sma3[i], 2)),
            Cell::new(&fmt_opt(returns[i], 4)),
            Cell::new(&result.signals[i].as_i8().to_string()),
            Cell::new(&result.curves.shares[i].to_string()),
            Cell::new(&format!("{:.2}", result.curves.equity[i])),
        ];
        if let Some(rsi) = rsi {
            cells.push(Cell::new(&fmt_opt(rsi[i], 2)));
        }
        table.add_row(Row::new(cells));
    }

    Ok(table)
}

//top `limit` sweep outcomes, already ranked
pub fn sweep_table(ranked: &[((usize, usize), SweepOutcome)], limit: usize) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Fast"),
        Cell::new("Slow"),
        Cell::new("Trades"),
        Cell::new("Final Equity"),
        Cell::new("Total Return"),
        Cell::new("Max Drawdown"),
        Cell::new("Sharpe"),
    ]));

    for ((fast, slow), outcome) in ranked.iter().take(limit) {
        table.add_row(Row::new(vec![
            Cell::new(&fast.to_string()),
            Cell::new(&slow.to_string()),
            Cell::new(&outcome.trades.to_string()),
            Cell::new(&format!("{:.2}", outcome.final_equity)),
            Cell::new(&format!("{:.2}%", outcome.metrics.total_return * 100.0)),
            Cell::new(&format!("{:.2}%", outcome.metrics.max_drawdown * 100.0)),
            Cell::new(&format!("{:.3}", outcome.metrics.sharpe_ratio)),
        ]));
    }

    table
}

pub fn save_equity_csv<P: AsRef<Path>>(equity_curve: &[EquityPoint], path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for point in equity_curve {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_trades_csv<P: AsRef<Path>>(trades: &[Trade], path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for trade in trades {
        writer.serialize(trade)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BacktestConfig, BacktestEngine};
    use crate::strategy::Signal;
    use tempfile::tempdir;

    fn sample() -> (PriceSeries, BacktestResult) {
        let series = PriceSeries::from_closes(vec![10.0, 10.0, 10.0, 9.0, 11.0]).unwrap();
        let signals = vec![
            Signal::Hold,
            Signal::Hold,
            Signal::Hold,
            Signal::Buy,
            Signal::Sell,
        ];
        let config = BacktestConfig { initial_cash: 100.0 };
        let result = BacktestEngine::new(&config, &series, signals)
            .unwrap()
            .run()
            .unwrap();
        (series, result)
    }

    #[test]
    fn tables_have_one_row_per_item() {
        let (series, result) = sample();
        assert_eq!(trades_table(&result.trades).len(), 3);
        assert_eq!(metrics_table(&result.metrics).len(), 4);

        let counts = SignalCounts::from_signals(&result.signals);
        assert_eq!(summary_table(100.0, counts, &result).len(), 6);

        let preview = preview_table(&series, &result, None, 3).unwrap();
        assert_eq!(preview.len(), 4);
        let preview = preview_table(&series, &result, None, 50).unwrap();
        assert_eq!(preview.len(), 6);
    }

    #[test]
    fn writes_trades_and_equity_csv() {
        let (series, result) = sample();
        let dir = tempdir().unwrap();

        let trades_path = dir.path().join("trades.csv");
        save_trades_csv(&result.trades, &trades_path).unwrap();
        let text = std::fs::read_to_string(&trades_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("index,date,side,price,shares,cash_after"));
        assert_eq!(lines.next(), Some("3,2000-01-04,BUY,9.0,11,1.0"));
        assert_eq!(lines.next(), Some("4,2000-01-05,SELL,11.0,11,122.0"));

        let equity_path = dir.path().join("equity.csv");
        save_equity_csv(&result.equity_curve(&series), &equity_path).unwrap();
        let text = std::fs::read_to_string(&equity_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "date,equity,drawdown,returns");
        assert_eq!(lines[1], "2000-01-01,100.0,0.0,");
    }
}
