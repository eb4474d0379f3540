use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dailyback::prelude::*;
use dailyback::report;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dailyback")]
#[command(about = "A Rust-based strategy backtester for daily closing prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a single backtest
    Run {
        //path to csv with columns Date,Close
        #[arg(long, default_value = "data/sample_prices.csv")]
        csv: PathBuf,

        //strategy type (ma, rsi)
        #[arg(long, default_value = "ma")]
        strategy: String,

        //fast sma window (ma strategy)
        #[arg(long, default_value = "10")]
        fast: usize,

        //slow sma window (ma strategy)
        #[arg(long, default_value = "50")]
        slow: usize,

        //rsi period (rsi strategy)
        #[arg(long, default_value = "14")]
        period: usize,

        //rsi buy threshold
        #[arg(long, default_value = "30.0")]
        buy_below: f64,

        //rsi sell threshold
        #[arg(long, default_value = "70.0")]
        sell_above: f64,

        //starting cash
        #[arg(long, default_value = "10000.0")]
        initial_cash: f64,

        //json configuration file, replaces the flags above
        #[arg(long)]
        config: Option<PathBuf>,

        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,
    },

    //run the crossover strategy over a grid of windows
    Sweep {
        //path to csv with columns Date,Close
        #[arg(long, default_value = "data/sample_prices.csv")]
        csv: PathBuf,

        #[arg(long, default_value = "5")]
        fast_min: usize,

        #[arg(long, default_value = "20")]
        fast_max: usize,

        #[arg(long, default_value = "20")]
        slow_min: usize,

        #[arg(long, default_value = "60")]
        slow_max: usize,

        //starting cash
        #[arg(long, default_value = "10000.0")]
        initial_cash: f64,

        //number of ranked results to print
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            csv,
            strategy,
            fast,
            slow,
            period,
            buy_below,
            sell_above,
            initial_cash,
            config,
            output_equity_csv,
            output_trades_csv,
        } => resolve_configuration(
            config,
            csv,
            &strategy,
            fast,
            slow,
            period,
            buy_below,
            sell_above,
            initial_cash,
            output_equity_csv,
            output_trades_csv,
        )
        .and_then(|configuration| run_backtest(&configuration)),
        Commands::Sweep {
            csv,
            fast_min,
            fast_max,
            slow_min,
            slow_max,
            initial_cash,
            top,
        } => run_parameter_sweep(
            &csv,
            SweepGrid {
                fast: fast_min..=fast_max,
                slow: slow_min..=slow_max,
            },
            initial_cash,
            top,
        ),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<BacktestError>() {
                Some(backtest_err) => ExitCode::from(backtest_err),
                None => ExitCode::FAILURE,
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_configuration(
    config_path: Option<PathBuf>,
    csv: PathBuf,
    strategy_name: &str,
    fast: usize,
    slow: usize,
    period: usize,
    buy_below: f64,
    sell_above: f64,
    initial_cash: f64,
    output_equity_csv: Option<PathBuf>,
    output_trades_csv: Option<PathBuf>,
) -> Result<BacktestConfiguration> {
    if let Some(path) = config_path {
        info!("reading configuration from {:?}", path);
        return BacktestConfiguration::from_json_file(&path)
            .context(format!("Failed to read configuration from {:?}", path));
    }

    let strategy_type = StrategyType::parse(strategy_name).ok_or_else(|| {
        BacktestError::invalid_parameter(format!(
            "unknown strategy '{}', use 'ma' or 'rsi'",
            strategy_name
        ))
    })?;

    let strategy = match strategy_type {
        StrategyType::Crossover => StrategyParams::Crossover(SmaParams {
            fast_window: fast,
            slow_window: slow,
        }),
        StrategyType::Threshold => StrategyParams::Threshold(RsiParams {
            period,
            buy_below,
            sell_above,
        }),
    };

    Ok(BacktestConfiguration {
        data_path: csv,
        initial_cash,
        strategy,
        output_equity_csv,
        output_trades_csv,
    })
}

fn run_backtest(configuration: &BacktestConfiguration) -> Result<()> {
    configuration.validate()?;

    println!("Daily Close Backtester");
    println!("======================\n");

    //load data
    let data_path = &configuration.data_path;
    let series = load_csv(data_path).context(format!("Failed to load data from {:?}", data_path))?;

    println!("CSV: {}", data_path.display());
    match &configuration.strategy {
        StrategyParams::Crossover(p) => {
            println!("Strategy: ma (fast={}, slow={})", p.fast_window, p.slow_window)
        }
        StrategyParams::Threshold(p) => println!(
            "Strategy: rsi (period={}, buy_below={}, sell_above={})",
            p.period, p.buy_below, p.sell_above
        ),
    }
    let (lo, hi) = series.close_range();
    println!("Loaded rows: {}", series.len());
    println!("Date range: {} -> {}", series.first_date(), series.last_date());
    println!("Close min/max: {:.2} / {:.2}\n", lo, hi);

    let strategy = build_strategy(&configuration.strategy)?;
    let config = BacktestConfig {
        initial_cash: configuration.initial_cash,
    };

    let result = BacktestEngine::run_strategy(&config, &series, strategy.as_ref())?;
    let counts = SignalCounts::from_signals(&result.signals);
    if result.trades.is_empty() {
        warn!("no trades executed, check the strategy windows against the series length");
    }

    println!("Backtest Results");
    println!("================\n");
    report::summary_table(configuration.initial_cash, counts, &result).printstd();

    if !result.trades.is_empty() {
        println!("\nTrades:");
        report::trades_table(&result.trades).printstd();
    }

    println!("\nMetrics:");
    report::metrics_table(&result.metrics).printstd();

    let rsi = match &configuration.strategy {
        StrategyParams::Threshold(p) => Some(relative_strength(series.closes(), p.period)?),
        StrategyParams::Crossover(_) => None,
    };
    println!("\nPreview (last 5 rows):");
    report::preview_table(&series, &result, rsi.as_deref(), 5)?.printstd();

    //save outputs if requested
    if let Some(equity_path) = &configuration.output_equity_csv {
        report::save_equity_csv(&result.equity_curve(&series), equity_path)
            .context(format!("Failed to write {:?}", equity_path))?;
        println!("\nEquity curve saved to {:?}", equity_path);
    }

    if let Some(trades_path) = &configuration.output_trades_csv {
        report::save_trades_csv(&result.trades, trades_path)
            .context(format!("Failed to write {:?}", trades_path))?;
        println!("Trades saved to {:?}", trades_path);
    }

    Ok(())
}

fn run_parameter_sweep(csv: &Path, grid: SweepGrid, initial_cash: f64, top: usize) -> Result<()> {
    let series = load_csv(csv).context(format!("Failed to load data from {:?}", csv))?;
    let config = BacktestConfig { initial_cash };

    let outcomes = run_sweep(&config, &series, &grid)?;
    let ranked = rank_by_sharpe(&outcomes);

    println!(
        "Crossover sweep: fast {:?}, slow {:?}, {} runs over {} bars\n",
        grid.fast,
        grid.slow,
        outcomes.len(),
        series.len()
    );
    report::sweep_table(&ranked, top).printstd();

    Ok(())
}
