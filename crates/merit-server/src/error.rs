//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Oracle error: {0}")]
    Oracle(#[from] merit_oracle::OracleError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] merit_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
