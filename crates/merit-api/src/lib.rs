//! HTTP and WebSocket surface for merit.
//!
//! Thin axum layer over the consensus, trading, and risk engines: handlers
//! translate requests into engine calls and engine errors into status
//! codes. Market events stream out over `/api/v1/events/ws`.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;
pub mod ws;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
