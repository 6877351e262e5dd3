//! Service wiring for merit.
//!
//! Builds the in-memory stores, the event bus, both engines, and the risk
//! orchestrator from one configuration, then serves the HTTP surface.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, ServerConfig, TokenSeed};
pub use error::{AppError, AppResult};
