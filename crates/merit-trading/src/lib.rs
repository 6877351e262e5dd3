//! Trade execution for merit reputation tokens.
//!
//! The engine prices buys and sells against the token directory, applies
//! the settlement fee, refuses tokens under an active circuit breaker, and
//! hands every committed trade to the risk orchestrator for a detached
//! post-trade pass.

pub mod config;
pub mod engine;
pub mod error;

pub use config::TradingConfig;
pub use engine::{TradeEngine, TradeExecution};
pub use error::{TradeError, TradeResult};
