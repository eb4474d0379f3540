use crate::error::{BacktestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyType {
    Crossover,
    Threshold,
}

impl StrategyType {
    //parse strategy type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ma" | "sma" | "crossover" => Some(StrategyType::Crossover),
            "rsi" | "threshold" => Some(StrategyType::Threshold),
            _ => None,
        }
    }
}

//sma crossover strategy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaParams {
    pub fast_window: usize,
    pub slow_window: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        SmaParams {
            fast_window: 10,
            slow_window: 50,
        }
    }
}

//rsi threshold strategy parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    pub period: usize,
    pub buy_below: f64,
    pub sell_above: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            period: 14,
            buy_below: 30.0,
            sell_above: 70.0,
        }
    }
}

//strategy-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyParams {
    Crossover(SmaParams),
    Threshold(RsiParams),
}

impl StrategyParams {
    pub fn strategy_type(&self) -> StrategyType {
        match self {
            StrategyParams::Crossover(_) => StrategyType::Crossover,
            StrategyParams::Threshold(_) => StrategyType::Threshold,
        }
    }
}

//complete backtest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfiguration {
    //data
    pub data_path: PathBuf,

    //account settings
    pub initial_cash: f64,

    //strategy
    pub strategy: StrategyParams,

    //optional output paths
    #[serde(default)]
    pub output_equity_csv: Option<PathBuf>,
    #[serde(default)]
    pub output_trades_csv: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        BacktestConfiguration {
            data_path: PathBuf::from("data/sample_prices.csv"),
            initial_cash: 10_000.0,
            strategy: StrategyParams::Crossover(SmaParams::default()),
            output_equity_csv: None,
            output_trades_csv: None,
        }
    }
}

impl BacktestConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //checks the settings that are not tied to a particular component
    pub fn validate(&self) -> Result<()> {
        if self.initial_cash.is_nan() || self.initial_cash <= 0.0 {
            return Err(BacktestError::invalid_input(format!(
                "initial cash must be > 0, got {}",
                self.initial_cash
            )));
        }
        Ok(())
    }
}
