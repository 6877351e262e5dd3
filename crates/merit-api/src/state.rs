//! Shared handler state.

use crate::ws::ConnectionLimiter;
use merit_bus::EventBus;
use merit_oracle::ConsensusEngine;
use merit_risk::RiskOrchestrator;
use merit_trading::TradeEngine;
use std::sync::Arc;

/// Everything the handlers need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub consensus: Arc<ConsensusEngine>,
    pub trading: Arc<TradeEngine>,
    pub risk: Arc<RiskOrchestrator>,
    pub bus: Arc<EventBus>,
    pub ws_limiter: Arc<ConnectionLimiter>,
}

impl AppState {
    pub fn new(
        consensus: Arc<ConsensusEngine>,
        trading: Arc<TradeEngine>,
        risk: Arc<RiskOrchestrator>,
        bus: Arc<EventBus>,
        max_ws_connections: usize,
    ) -> Self {
        Self {
            consensus,
            trading,
            risk,
            bus,
            ws_limiter: Arc::new(ConnectionLimiter::new(max_ws_connections)),
        }
    }
}
