//! Application wiring and lifecycle.
//!
//! Builds every component from the configuration, seeds the token
//! directory, and runs the axum server until a shutdown signal arrives.

use crate::config::AppConfig;
use crate::error::AppResult;
use merit_api::{create_router, AppState};
use merit_bus::EventBus;
use merit_core::{Clock, SystemClock, TokenInfo};
use merit_oracle::{ConsensusEngine, SentimentValuator};
use merit_risk::{BreakerRegistry, RiskOrchestrator};
use merit_store::{
    InMemoryReportStore, InMemorySubjectStore, InMemoryTokenDirectory, InMemoryTradeStore,
    TokenDirectory,
};
use merit_trading::TradeEngine;
use std::sync::Arc;
use tracing::{error, info};

/// Fully wired service, ready to run.
pub struct Application {
    config: AppConfig,
    state: AppState,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let reports = Arc::new(InMemoryReportStore::new());
        let subjects = Arc::new(InMemorySubjectStore::new());
        let trades = Arc::new(InMemoryTradeStore::new());
        let tokens = Arc::new(InMemoryTokenDirectory::new());
        let bus = Arc::new(EventBus::default());
        let breaker = Arc::new(BreakerRegistry::new(clock.clone()));

        for seed in &config.tokens {
            tokens.insert(TokenInfo {
                token_id: seed.token_id,
                subject_id: seed.subject_id,
                symbol: seed.symbol.clone(),
                price: seed.price,
            });
        }
        info!(token_count = config.tokens.len(), "Token directory seeded");

        let orchestrator = Arc::new(RiskOrchestrator::new(
            trades.clone(),
            tokens.clone(),
            breaker,
            bus.clone(),
            clock.clone(),
            config.risk.clone(),
        ));
        let valuator = Arc::new(SentimentValuator::new(
            reports.clone(),
            subjects,
            bus.clone(),
            clock.clone(),
            config.valuation.clone(),
        ));
        let consensus = Arc::new(ConsensusEngine::new(
            reports,
            valuator,
            bus.clone(),
            clock.clone(),
            config.consensus.clone(),
        )?);
        let trading = Arc::new(TradeEngine::new(
            tokens,
            trades,
            orchestrator.clone(),
            clock,
            config.trading.clone(),
        ));

        let state = AppState::new(
            consensus,
            trading,
            orchestrator,
            bus,
            config.server.max_ws_connections,
        );
        Ok(Self { config, state })
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        let app = create_router(self.state);
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        info!(addr = %addr, "Starting merit server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
