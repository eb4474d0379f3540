use approx::assert_relative_eq;
use dailyback::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(rows: &[(&str, f64)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Close").unwrap();
    for (date, close) in rows {
        writeln!(file, "{},{}", date, close).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn csv_to_metrics_with_fixed_signals() {
    //rows out of order on disk, loader sorts them
    let file = csv_file(&[
        ("2024-01-05", 11.0),
        ("2024-01-01", 10.0),
        ("2024-01-02", 10.0),
        ("2024-01-03", 10.0),
        ("2024-01-04", 9.0),
    ]);
    let series = load_csv(file.path()).unwrap();
    assert_eq!(series.closes(), &[10.0, 10.0, 10.0, 9.0, 11.0]);

    let signals = [0i8, 0, 0, 1, -1]
        .into_iter()
        .map(Signal::try_from)
        .collect::<Result<Vec<_>>>()
        .unwrap();

    let config = BacktestConfig { initial_cash: 100.0 };
    let result = BacktestEngine::new(&config, &series, signals)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.trades[0].date, "2024-01-04");
    assert_eq!(result.trades[0].shares, 11);
    assert_eq!(result.trades[1].cash_after, 122.0);
    assert_eq!(result.curves.final_equity(), Some(122.0));
    assert_relative_eq!(result.metrics.total_return, 0.22, epsilon = 1e-12);
    assert_eq!(result.metrics.max_drawdown, 0.0);
}

#[test]
fn rsi_strategy_repeats_collapse_into_single_trades() {
    //a slide then a rally: oversold run, then overbought run
    let mut closes: Vec<f64> = (0..10).map(|i| 100.0 - 3.0 * i as f64).collect();
    closes.extend((1..=12).map(|i| 73.0 + 4.0 * i as f64));
    let series = PriceSeries::from_closes(closes).unwrap();

    let strategy = build_strategy(&StrategyParams::Threshold(RsiParams {
        period: 3,
        buy_below: 30.0,
        sell_above: 90.0,
    }))
    .unwrap();

    let config = BacktestConfig { initial_cash: 1_000.0 };
    let result = BacktestEngine::run_strategy(&config, &series, strategy.as_ref()).unwrap();

    let counts = SignalCounts::from_signals(&result.signals);
    assert!(counts.buys > 1);
    assert!(counts.sells > 1);

    //many repeated signals, one round trip
    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.trades[0].side, OrderSide::Buy);
    assert_eq!(result.trades[1].side, OrderSide::Sell);
    //bought at 91 on the first oversold bar, sold at 97 once rsi clears 90
    assert_eq!((result.trades[0].index, result.trades[0].shares), (3, 10));
    assert_eq!(result.trades[1].index, 15);
    assert_eq!(result.curves.final_equity(), Some(1_060.0));
}

#[test]
fn crossover_on_sample_data_keeps_invariants() {
    let series = load_csv(concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_prices.csv")).unwrap();
    let strategy = SmaCrossoverStrategy::new(5, 20).unwrap();
    let result =
        BacktestEngine::run_strategy(&BacktestConfig::default(), &series, &strategy).unwrap();

    assert_eq!(result.curves.len(), series.len());
    assert!(result.signals[..20].iter().all(|s| *s == Signal::Hold));
    for (i, close) in series.closes().iter().enumerate() {
        let c = &result.curves;
        assert!(c.cash[i] >= 0.0);
        assert_eq!(c.equity[i], c.cash[i] + c.shares[i] as f64 * close);
    }
    assert!(result.metrics.max_drawdown <= 0.0);
}

#[test]
fn invalid_configuration_surfaces_typed_errors() {
    let series = PriceSeries::from_closes(vec![1.0, 2.0, 3.0]).unwrap();

    let err = build_strategy(&StrategyParams::Crossover(SmaParams {
        fast_window: 10,
        slow_window: 5,
    }))
    .err()
    .unwrap();
    assert!(matches!(err, BacktestError::InvalidParameter(_)));

    let err = BacktestEngine::new(&BacktestConfig { initial_cash: -1.0 }, &series, vec![Signal::Hold; 3])
        .err()
        .unwrap();
    assert!(matches!(err, BacktestError::InvalidInput(_)));
}
