use std::process::ExitCode;
use thiserror::Error;

//errors raised by the pipeline
#[derive(Error, Debug)]
pub enum BacktestError {
    //bad strategy or indicator configuration
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    //malformed series or account settings
    #[error("invalid input: {0}")]
    InvalidInput(String),

    //degenerate metrics input
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BacktestError>;

impl BacktestError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        BacktestError::InvalidParameter(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BacktestError::InvalidInput(msg.into())
    }

    //process exit status for this kind of failure
    pub fn status(&self) -> u8 {
        match self {
            BacktestError::Io(_) | BacktestError::Csv(_) => 1,
            BacktestError::InvalidParameter(_) => 2,
            BacktestError::InvalidInput(_) => 3,
            BacktestError::DivisionByZero(_) => 4,
        }
    }
}

impl From<&BacktestError> for ExitCode {
    fn from(err: &BacktestError) -> Self {
        ExitCode::from(err.status())
    }
}
