//! Error types for merit-store.

use thiserror::Error;

/// Storage error types.
///
/// The in-memory backends never fail; the variants exist for durable
/// backends behind the same traits.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
