//! Error types for the trading crate.

use merit_core::TokenId;
use merit_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradeError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("trading locked: circuit breaker active for token {0}")]
    TradingLocked(TokenId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type TradeResult<T> = Result<T, TradeError>;
