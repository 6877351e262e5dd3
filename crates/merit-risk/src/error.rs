//! Error types for merit-risk.

use merit_core::TokenId;
use merit_store::StoreError;
use thiserror::Error;

/// Risk subsystem error types.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for risk operations.
pub type RiskResult<T> = std::result::Result<T, RiskError>;
