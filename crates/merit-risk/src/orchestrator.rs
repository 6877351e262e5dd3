//! Post-trade risk orchestration.
//!
//! Runs every detector after a committed trade, trips the breaker on
//! critical findings, and notifies the bus. The pass is best-effort: the
//! trade is already committed when it runs, so nothing here may propagate
//! back to the trade path.

use crate::{
    BreakerRegistry, CliffEventDetector, PumpAndDumpDetector, RiskConfig, RiskError, RiskResult,
    WashTradeDetector,
};
use chrono::{DateTime, Duration, Utc};
use merit_bus::{BusEvent, EventBus};
use merit_core::{Amount, Clock, RiskAlert, TokenId, TraderAddress};
use merit_store::{TokenDirectory, TradeStore};
use merit_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, warn};

/// Rolling activity and breaker status for one token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRiskSummary {
    pub token_id: TokenId,
    pub window_minutes: u64,
    pub trade_count: usize,
    pub unique_traders: usize,
    /// Settlement-currency volume over the window.
    pub total_volume: Amount,
    pub breaker_active: bool,
    pub breaker_expires_at: Option<DateTime<Utc>>,
}

/// Runs the detectors once per committed trade and acts on the findings.
pub struct RiskOrchestrator {
    trades: Arc<dyn TradeStore>,
    tokens: Arc<dyn TokenDirectory>,
    breaker: Arc<BreakerRegistry>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    config: RiskConfig,
    wash: WashTradeDetector,
    pump: PumpAndDumpDetector,
    cliff: CliffEventDetector,
}

impl RiskOrchestrator {
    pub fn new(
        trades: Arc<dyn TradeStore>,
        tokens: Arc<dyn TokenDirectory>,
        breaker: Arc<BreakerRegistry>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
        config: RiskConfig,
    ) -> Self {
        Self {
            wash: WashTradeDetector::new(config.clone()),
            pump: PumpAndDumpDetector::new(config.clone()),
            cliff: CliffEventDetector::new(config.clone()),
            trades,
            tokens,
            breaker,
            bus,
            clock,
            config,
        }
    }

    /// Run all three detectors over their windows and collect findings.
    ///
    /// Wash trading is scoped to the trader who just dealt; the market-wide
    /// detectors see every trade on the token.
    pub fn run_checks(
        &self,
        token_id: TokenId,
        trader: &TraderAddress,
    ) -> RiskResult<Vec<RiskAlert>> {
        let now = self.clock.now();
        let mut alerts = Vec::new();

        let wash_since = now - Duration::seconds(self.config.wash_window_secs as i64);
        let wash_trades = self.trades.query(token_id, Some(trader), wash_since)?;
        if let Some(alert) = self.wash.check(token_id, trader, &wash_trades) {
            alerts.push(alert);
        }

        let pump_since = now - Duration::minutes(self.config.pump_window_minutes as i64);
        let pump_trades = self.trades.query(token_id, None, pump_since)?;
        if let Some(alert) = self.pump.check(token_id, &pump_trades) {
            alerts.push(alert);
        }

        let cliff_since = now - Duration::minutes(self.config.cliff_window_minutes as i64);
        let cliff_trades = self.trades.query(token_id, None, cliff_since)?;
        if let Some(alert) = self.cliff.check(token_id, &cliff_trades) {
            alerts.push(alert);
        }

        Ok(alerts)
    }

    /// Full post-trade pass: detect, trip the breaker on criticals, notify.
    ///
    /// Never fails: every error is logged and swallowed here, because the
    /// trade this pass follows has already been committed.
    pub fn run_post_trade(&self, token_id: TokenId, trader: &TraderAddress) {
        let started = std::time::Instant::now();
        let alerts = match self.run_checks(token_id, trader) {
            Ok(alerts) => alerts,
            Err(e) => {
                error!(token_id = %token_id, error = %e, "Risk check pass failed");
                return;
            }
        };
        Metrics::risk_pass_duration(started.elapsed().as_secs_f64() * 1000.0);

        for alert in &alerts {
            warn!(
                token_id = %token_id,
                risk_type = %alert.risk_type,
                severity = %alert.severity,
                "Risk alert raised"
            );
            Metrics::risk_alert(alert.risk_type.as_str(), alert.severity.as_str());
        }

        let criticals: Vec<&RiskAlert> = alerts.iter().filter(|a| a.is_critical()).collect();
        if criticals.is_empty() {
            return;
        }

        // One activation per pass, however many critical findings.
        let pause = Duration::minutes(self.config.pause_minutes as i64);
        self.breaker.activate(token_id, pause);
        Metrics::breaker_activated();
        Metrics::set_active_breakers(self.breaker.list_active().len() as i64);

        match self.tokens.get(token_id) {
            Some(info) => {
                for alert in criticals {
                    self.bus.publish(BusEvent::risk_alert(
                        info.subject_id,
                        alert,
                        self.config.pause_minutes,
                    ));
                }
            }
            None => warn!(
                token_id = %token_id,
                "Token missing from directory; breaker tripped without bus notification"
            ),
        }
    }

    /// Spawn the pass as an independent task. The caller must not await it
    /// on the trade-response path; the handle exists for tests and shutdown.
    pub fn spawn_post_trade(
        self: &Arc<Self>,
        token_id: TokenId,
        trader: TraderAddress,
    ) -> tokio::task::JoinHandle<()> {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.run_post_trade(token_id, &trader);
        })
    }

    /// Rolling activity summary plus current breaker status for one token.
    pub fn token_summary(&self, token_id: TokenId) -> RiskResult<TokenRiskSummary> {
        if self.tokens.get(token_id).is_none() {
            return Err(RiskError::UnknownToken(token_id));
        }

        let now = self.clock.now();
        let since = now - Duration::minutes(self.config.summary_window_minutes as i64);
        let trades = self.trades.query(token_id, None, since)?;

        let unique: HashSet<&TraderAddress> = trades.iter().map(|t| &t.trader).collect();
        let total_volume: Amount = trades.iter().map(|t| t.settlement_amount).sum();
        let breaker_expires_at = self.breaker.expiry(token_id);

        Ok(TokenRiskSummary {
            token_id,
            window_minutes: self.config.summary_window_minutes,
            trade_count: trades.len(),
            unique_traders: unique.len(),
            total_volume,
            breaker_active: breaker_expires_at.is_some(),
            breaker_expires_at,
        })
    }

    pub fn breaker(&self) -> &BreakerRegistry {
        &self.breaker
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_bus::EventKind;
    use merit_core::{ManualClock, Price, SubjectId, Trade, TradeSide};
    use merit_store::{InMemoryTokenDirectory, InMemoryTradeStore, StoreError, StoreResult};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Fixture {
        orchestrator: Arc<RiskOrchestrator>,
        trades: Arc<InMemoryTradeStore>,
        bus: Arc<EventBus>,
        clock: ManualClock,
        token_id: TokenId,
        subject_id: SubjectId,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::start_now();
        let trades = Arc::new(InMemoryTradeStore::new());
        let tokens = Arc::new(InMemoryTokenDirectory::new());
        let bus = Arc::new(EventBus::default());
        let breaker = Arc::new(BreakerRegistry::new(Arc::new(clock.clone())));

        let token_id = TokenId::generate();
        let subject_id = SubjectId::generate();
        tokens.insert(merit_core::TokenInfo {
            token_id,
            subject_id,
            symbol: "RPT-TEST".to_string(),
            price: Price::new(dec!(0.01)),
        });

        let orchestrator = Arc::new(RiskOrchestrator::new(
            trades.clone(),
            tokens,
            breaker,
            bus.clone(),
            Arc::new(clock.clone()),
            RiskConfig::default(),
        ));

        Fixture {
            orchestrator,
            trades,
            bus,
            clock,
            token_id,
            subject_id,
        }
    }

    fn insert_trade(
        f: &Fixture,
        trader: &str,
        side: TradeSide,
        token_amount: Decimal,
        settlement: Decimal,
        price: Decimal,
        secs_ago: i64,
    ) {
        f.trades
            .insert(Trade::new(
                f.token_id,
                TraderAddress::from(trader),
                side,
                Amount::new(token_amount),
                Amount::new(settlement),
                Price::new(price),
                Amount::ZERO,
                f.clock.now() - Duration::seconds(secs_ago),
            ))
            .unwrap();
    }

    #[tokio::test]
    async fn test_critical_finding_trips_breaker_and_notifies() {
        let f = fixture();
        let mut alerts = f.bus.subscribe_topic(EventKind::RiskAlert);

        // Two sells halving the price inside ten minutes.
        insert_trade(&f, "0xa", TradeSide::Sell, dec!(100), dec!(1), dec!(0.01), 300);
        insert_trade(&f, "0xb", TradeSide::Sell, dec!(200), dec!(1), dec!(0.005), 10);

        f.orchestrator
            .run_post_trade(f.token_id, &TraderAddress::from("0xb"));

        assert!(f.orchestrator.breaker().is_active(f.token_id));

        let event = alerts.recv().await.unwrap();
        assert_eq!(event.kind, EventKind::RiskAlert);
        assert_eq!(event.payload["risk_type"], "cliff_event");
        assert_eq!(event.payload["action"], "circuit_breaker");
        assert_eq!(event.payload["pause_minutes"], 15);
        assert_eq!(
            event.payload["subject_id"],
            serde_json::to_value(f.subject_id).unwrap()
        );
        // Exactly one critical finding, exactly one event.
        assert!(alerts.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_warning_only_does_not_trip_breaker() {
        let f = fixture();
        let mut alerts = f.bus.subscribe_topic(EventKind::RiskAlert);

        // Symmetric round trip at stable price: wash warning, nothing else.
        insert_trade(&f, "0xwash", TradeSide::Buy, dec!(1000), dec!(10), dec!(0.01), 120);
        insert_trade(&f, "0xwash", TradeSide::Sell, dec!(950), dec!(9.5), dec!(0.01), 30);

        f.orchestrator
            .run_post_trade(f.token_id, &TraderAddress::from("0xwash"));

        assert!(!f.orchestrator.breaker().is_active(f.token_id));
        assert!(alerts.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_warning_and_critical_emit_only_critical() {
        let f = fixture();
        let mut alerts = f.bus.subscribe_topic(EventKind::RiskAlert);

        // One trader round-trips nearly full volume while the price halves:
        // wash (warning) and cliff (critical) both fire.
        insert_trade(&f, "0xwash", TradeSide::Buy, dec!(1000), dec!(10), dec!(0.01), 240);
        insert_trade(&f, "0xwash", TradeSide::Sell, dec!(950), dec!(4.75), dec!(0.005), 30);

        f.orchestrator
            .run_post_trade(f.token_id, &TraderAddress::from("0xwash"));

        assert!(f.orchestrator.breaker().is_active(f.token_id));
        let event = alerts.recv().await.unwrap();
        assert_eq!(event.payload["risk_type"], "cliff_event");
        assert!(alerts.try_recv().is_err(), "warning must not reach the bus");
    }

    #[tokio::test]
    async fn test_spawned_pass_runs_detached() {
        let f = fixture();

        insert_trade(&f, "0xa", TradeSide::Sell, dec!(100), dec!(1), dec!(0.01), 300);
        insert_trade(&f, "0xb", TradeSide::Sell, dec!(200), dec!(1), dec!(0.005), 10);

        let handle = f
            .orchestrator
            .spawn_post_trade(f.token_id, TraderAddress::from("0xb"));
        handle.await.unwrap();

        assert!(f.orchestrator.breaker().is_active(f.token_id));
    }

    struct FailingTradeStore;

    impl TradeStore for FailingTradeStore {
        fn insert(&self, _trade: Trade) -> StoreResult<()> {
            Err(StoreError::Backend("down".to_string()))
        }

        fn query(
            &self,
            _token_id: TokenId,
            _trader: Option<&TraderAddress>,
            _since: DateTime<Utc>,
        ) -> StoreResult<Vec<Trade>> {
            Err(StoreError::Backend("down".to_string()))
        }

        fn recent(
            &self,
            _token_id: Option<TokenId>,
            _trader: Option<&TraderAddress>,
            _limit: usize,
        ) -> StoreResult<Vec<Trade>> {
            Err(StoreError::Backend("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let clock = ManualClock::start_now();
        let tokens = Arc::new(InMemoryTokenDirectory::new());
        let bus = Arc::new(EventBus::default());
        let breaker = Arc::new(BreakerRegistry::new(Arc::new(clock.clone())));
        let token_id = TokenId::generate();

        let orchestrator = RiskOrchestrator::new(
            Arc::new(FailingTradeStore),
            tokens,
            breaker,
            bus,
            Arc::new(clock),
            RiskConfig::default(),
        );

        // Must not panic or propagate; the trade behind this pass already
        // committed.
        orchestrator.run_post_trade(token_id, &TraderAddress::from("0xa"));
        assert!(!orchestrator.breaker().is_active(token_id));
    }

    #[tokio::test]
    async fn test_token_summary_counts_window_activity() {
        let f = fixture();

        insert_trade(&f, "0xa", TradeSide::Buy, dec!(100), dec!(1), dec!(0.01), 1800);
        insert_trade(&f, "0xb", TradeSide::Buy, dec!(50), dec!(0.5), dec!(0.01), 600);
        insert_trade(&f, "0xa", TradeSide::Sell, dec!(30), dec!(0.3), dec!(0.01), 60);
        // Outside the one-hour window.
        insert_trade(&f, "0xc", TradeSide::Buy, dec!(10), dec!(0.1), dec!(0.01), 7200);

        let summary = f.orchestrator.token_summary(f.token_id).unwrap();
        assert_eq!(summary.trade_count, 3);
        assert_eq!(summary.unique_traders, 2);
        assert_eq!(summary.total_volume, Amount::new(dec!(1.8)));
        assert!(!summary.breaker_active);
        assert!(summary.breaker_expires_at.is_none());
    }

    #[tokio::test]
    async fn test_token_summary_reports_breaker() {
        let f = fixture();
        f.orchestrator
            .breaker()
            .activate(f.token_id, Duration::minutes(15));

        let summary = f.orchestrator.token_summary(f.token_id).unwrap();
        assert!(summary.breaker_active);
        assert!(summary.breaker_expires_at.is_some());
    }

    #[tokio::test]
    async fn test_token_summary_unknown_token() {
        let f = fixture();
        let missing = TokenId::generate();
        assert!(matches!(
            f.orchestrator.token_summary(missing),
            Err(RiskError::UnknownToken(_))
        ));
    }
}
