//! In-process event bus.
//!
//! Risk and oracle components notify downstream consumers (spread adjusters,
//! cross-verifying agents, dashboards) through broadcast channels. Publishing
//! is fire-and-forget: no delivery guarantee, and a publish with zero
//! subscribers is not an error.

pub mod bus;
pub mod event;

pub use bus::EventBus;
pub use event::{BusEvent, EventKind};
