//! Prometheus metrics for the merit service.
//!
//! Covers the two integrity pipelines end to end:
//! - Oracle: submissions, votes, finalizations, valuations
//! - Risk: alerts by type/severity, breaker state, blocked trades
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, register_int_gauge,
    CounterVec, Histogram, IntCounter, IntGauge,
};

/// Total oracle reports submitted.
pub static REPORTS_SUBMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "merit_reports_submitted_total",
        "Total oracle reports submitted"
    )
    .unwrap()
});

/// Total votes cast on oracle reports.
/// Labels: vote (approve/reject)
pub static VOTES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "merit_votes_total",
        "Total votes cast on oracle reports",
        &["vote"]
    )
    .unwrap()
});

/// Total reports reaching a final status.
/// Labels: outcome (confirmed/rejected)
pub static REPORTS_FINALIZED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "merit_reports_finalized_total",
        "Total oracle reports finalized",
        &["outcome"]
    )
    .unwrap()
});

/// Total valuation snapshots computed.
pub static VALUATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "merit_valuations_total",
        "Total valuation snapshots computed"
    )
    .unwrap()
});

/// Total risk alerts raised.
/// Labels: risk_type (wash_trading/pump_and_dump/cliff_event), severity
pub static RISK_ALERTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "merit_risk_alerts_total",
        "Total risk alerts raised",
        &["risk_type", "severity"]
    )
    .unwrap()
});

/// Total circuit breaker activations.
pub static BREAKER_ACTIVATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "merit_breaker_activations_total",
        "Total circuit breaker activations"
    )
    .unwrap()
});

/// Currently active circuit breakers.
pub static ACTIVE_BREAKERS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "merit_active_breakers",
        "Currently active circuit breakers"
    )
    .unwrap()
});

/// Total trades executed.
/// Labels: side (buy/sell)
pub static TRADES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!("merit_trades_total", "Total trades executed", &["side"]).unwrap()
});

/// Total trades rejected by an active circuit breaker.
pub static TRADES_BLOCKED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "merit_trades_blocked_total",
        "Total trades rejected by an active circuit breaker"
    )
    .unwrap()
});

/// Post-trade risk pass duration in milliseconds.
pub static RISK_PASS_DURATION_MS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "merit_risk_pass_duration_ms",
        "Post-trade risk pass duration in milliseconds",
        vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 500.0]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record a submitted report.
    pub fn report_submitted() {
        REPORTS_SUBMITTED_TOTAL.inc();
    }

    /// Record a cast vote.
    pub fn vote_cast(approve: bool) {
        let label = if approve { "approve" } else { "reject" };
        VOTES_TOTAL.with_label_values(&[label]).inc();
    }

    /// Record a report reaching a final status.
    pub fn report_finalized(outcome: &str) {
        REPORTS_FINALIZED_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Record a computed valuation snapshot.
    pub fn valuation_computed() {
        VALUATIONS_TOTAL.inc();
    }

    /// Record a raised risk alert.
    pub fn risk_alert(risk_type: &str, severity: &str) {
        RISK_ALERTS_TOTAL
            .with_label_values(&[risk_type, severity])
            .inc();
    }

    /// Record a breaker activation.
    pub fn breaker_activated() {
        BREAKER_ACTIVATIONS_TOTAL.inc();
    }

    /// Set the active breaker gauge.
    pub fn set_active_breakers(count: i64) {
        ACTIVE_BREAKERS.set(count);
    }

    /// Record an executed trade.
    pub fn trade_executed(side: &str) {
        TRADES_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record a trade blocked by the breaker.
    pub fn trade_blocked() {
        TRADES_BLOCKED_TOTAL.inc();
    }

    /// Record the duration of one post-trade risk pass.
    pub fn risk_pass_duration(duration_ms: f64) {
        RISK_PASS_DURATION_MS.observe(duration_ms);
    }
}
