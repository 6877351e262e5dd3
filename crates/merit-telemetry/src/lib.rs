//! Prometheus metrics and structured logging for merit.
//!
//! Provides observability for the market-integrity service:
//! - Prometheus metrics for reports, votes, risk alerts, breaker state
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
