//! Subject revaluation from confirmed report history.

use crate::config::ValuatorConfig;
use crate::OracleResult;
use merit_bus::{BusEvent, EventBus};
use merit_core::{
    Amount, Clock, OracleReport, SubjectId, ValuationDetails, ValuationSnapshot, ValuationTrigger,
};
use merit_store::{ReportStore, SubjectStore};
use merit_telemetry::Metrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Recomputes a subject's composite score and fair value.
///
/// Called by the consensus engine, synchronously, on the pending ->
/// confirmed transition only. Each call appends exactly one snapshot.
pub trait Valuator: Send + Sync {
    fn revalue(
        &self,
        subject_id: SubjectId,
        trigger: &OracleReport,
    ) -> OracleResult<ValuationSnapshot>;
}

/// Scores a subject by the sentiment balance of its confirmed reports.
///
/// `sentiment = 0.5 + 0.3 * (positive - negative) / max(total, 1)`, so the
/// composite stays in [0.2, 0.8] and the score in [20, 80]. Fair value is
/// the configured baseline scaled by the sentiment.
pub struct SentimentValuator {
    reports: Arc<dyn ReportStore>,
    subjects: Arc<dyn SubjectStore>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    config: ValuatorConfig,
}

impl SentimentValuator {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        subjects: Arc<dyn SubjectStore>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
        config: ValuatorConfig,
    ) -> Self {
        Self {
            reports,
            subjects,
            bus,
            clock,
            config,
        }
    }
}

impl Valuator for SentimentValuator {
    fn revalue(
        &self,
        subject_id: SubjectId,
        trigger: &OracleReport,
    ) -> OracleResult<ValuationSnapshot> {
        let confirmed = self.reports.confirmed_for_subject(subject_id)?;
        let positive = confirmed.iter().filter(|r| r.magnitude > 0).count();
        let negative = confirmed.iter().filter(|r| r.magnitude < 0).count();
        let neutral = confirmed.len() - positive - negative;

        let total = Decimal::from(confirmed.len().max(1) as u64);
        let balance = Decimal::from(positive as i64) - Decimal::from(negative as i64);
        let sentiment = dec!(0.5) + dec!(0.3) * balance / total;
        let score = (sentiment * dec!(100)).clamp(Decimal::ZERO, dec!(100));
        let fair_value = Amount::new(sentiment * self.config.baseline_valuation);

        let old_score = self
            .subjects
            .get(subject_id)?
            .map(|r| r.score)
            .unwrap_or_else(|| Decimal::from(50));

        let snapshot = ValuationSnapshot {
            id: Uuid::new_v4(),
            subject_id,
            score,
            fair_value,
            trigger: ValuationTrigger::OracleReport,
            trigger_report_id: trigger.id,
            details: ValuationDetails {
                positive,
                negative,
                neutral,
                sentiment,
            },
            computed_at: self.clock.now(),
        };
        self.subjects.record_valuation(&snapshot)?;
        Metrics::valuation_computed();

        info!(
            subject_id = %subject_id,
            score = %score,
            fair_value = %fair_value,
            confirmed_reports = confirmed.len(),
            "Subject revalued"
        );

        let change_pct = (score - old_score).abs() / old_score.max(Decimal::ONE) * dec!(100);
        if change_pct >= self.config.change_threshold_pct {
            self.bus.publish(BusEvent::valuation_changed(
                subject_id,
                old_score,
                score,
                change_pct.round_dp(2),
                fair_value,
            ));
        } else {
            debug!(
                subject_id = %subject_id,
                change_pct = %change_pct,
                "Score move below event threshold"
            );
        }

        Ok(snapshot)
    }
}
