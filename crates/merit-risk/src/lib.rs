//! Anomaly detection and circuit breaker for merit trading.
//!
//! Three windowed detectors read the trade ledger after every committed
//! trade:
//! - WashTrade: near-symmetric round-trip volume by one trader
//! - PumpAndDump: sharp price rise with concentrated buying
//! - CliffEvent: sudden price collapse
//!
//! Critical findings trip a time-boxed circuit breaker that blocks further
//! trading on the token. The whole pass is best-effort and runs off the
//! trade-response path.

pub mod breaker;
pub mod config;
pub mod detectors;
pub mod error;
pub mod orchestrator;

pub use breaker::BreakerRegistry;
pub use config::RiskConfig;
pub use detectors::{CliffEventDetector, PumpAndDumpDetector, WashTradeDetector};
pub use error::{RiskError, RiskResult};
pub use orchestrator::{RiskOrchestrator, TokenRiskSummary};
