//! Error types for the oracle crate.

use merit_core::ReportId;
use merit_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("report not found: {0}")]
    NotFound(ReportId),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type OracleResult<T> = Result<T, OracleError>;
