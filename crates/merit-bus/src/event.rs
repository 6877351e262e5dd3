//! Bus event envelope and payload builders.

use chrono::{DateTime, Utc};
use merit_core::{Amount, OracleReport, RiskAlert, SubjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Event type, doubling as the sub-topic key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RiskAlert,
    ReportPending,
    ReportConfirmed,
    ValuationChanged,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RiskAlert => "risk_alert",
            Self::ReportPending => "report_pending",
            Self::ReportConfirmed => "report_confirmed",
            Self::ValuationChanged => "valuation_changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One published event: kind plus a flat JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusEvent {
    pub kind: EventKind,
    pub payload: Value,
    pub published_at: DateTime<Utc>,
}

impl BusEvent {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self {
            kind,
            payload,
            published_at: Utc::now(),
        }
    }

    /// A critical risk finding tripped the circuit breaker for a token.
    pub fn risk_alert(subject_id: SubjectId, alert: &RiskAlert, pause_minutes: u64) -> Self {
        Self::new(
            EventKind::RiskAlert,
            json!({
                "subject_id": subject_id,
                "token_id": alert.token_id,
                "risk_type": alert.risk_type,
                "severity": alert.severity,
                "evidence": alert.evidence,
                "action": "circuit_breaker",
                "pause_minutes": pause_minutes,
            }),
        )
    }

    /// A new report entered the pending state; other agents should
    /// cross-verify.
    pub fn report_pending(report: &OracleReport) -> Self {
        Self::new(
            EventKind::ReportPending,
            json!({
                "report_id": report.id,
                "subject_id": report.subject_id,
                "headline": report.headline,
                "source": report.source,
                "action": "cross_verify",
            }),
        )
    }

    /// A report reached quorum; the subject should be revalued.
    pub fn report_confirmed(report: &OracleReport) -> Self {
        Self::new(
            EventKind::ReportConfirmed,
            json!({
                "report_id": report.id,
                "subject_id": report.subject_id,
                "magnitude": report.magnitude,
                "category": report.category,
                "action": "revalue",
            }),
        )
    }

    /// A subject's composite score moved enough to matter for spreads.
    pub fn valuation_changed(
        subject_id: SubjectId,
        old_score: Decimal,
        new_score: Decimal,
        change_pct: Decimal,
        fair_value: Amount,
    ) -> Self {
        Self::new(
            EventKind::ValuationChanged,
            json!({
                "subject_id": subject_id,
                "old_score": old_score,
                "new_score": new_score,
                "change_pct": change_pct,
                "fair_value": fair_value,
                "action": "adjust_spread",
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::{RiskEvidence, RiskSeverity, RiskType, TokenId, TraderAddress};
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_alert_payload_shape() {
        let alert = RiskAlert {
            risk_type: RiskType::CliffEvent,
            severity: RiskSeverity::Critical,
            token_id: TokenId::generate(),
            evidence: RiskEvidence::CliffEvent {
                price_drop_pct: dec!(50),
                sell_volume: Amount::new(dec!(3)),
                trade_count: 2,
                window_minutes: 10,
            },
        };
        let event = BusEvent::risk_alert(SubjectId::generate(), &alert, 15);

        assert_eq!(event.kind, EventKind::RiskAlert);
        assert_eq!(event.payload["action"], "circuit_breaker");
        assert_eq!(event.payload["risk_type"], "cliff_event");
        assert_eq!(event.payload["pause_minutes"], 15);
    }

    #[test]
    fn test_valuation_changed_payload_shape() {
        let event = BusEvent::valuation_changed(
            SubjectId::generate(),
            dec!(50),
            dec!(65),
            dec!(30),
            Amount::new(dec!(650)),
        );
        assert_eq!(event.kind, EventKind::ValuationChanged);
        assert_eq!(event.payload["action"], "adjust_spread");
        assert_eq!(event.payload["change_pct"], "30");
    }

    #[test]
    fn test_kind_display_matches_topic_names() {
        assert_eq!(EventKind::RiskAlert.to_string(), "risk_alert");
        assert_eq!(EventKind::ReportPending.to_string(), "report_pending");
    }

    #[test]
    fn test_evidence_appears_flat_under_evidence_key() {
        let alert = RiskAlert {
            risk_type: RiskType::WashTrading,
            severity: RiskSeverity::Warning,
            token_id: TokenId::generate(),
            evidence: RiskEvidence::WashTrading {
                trader: TraderAddress::from("0xabc"),
                buy_volume: Amount::new(dec!(1000)),
                sell_volume: Amount::new(dec!(950)),
                ratio: dec!(0.95),
                trade_count: 2,
                window_seconds: 300,
            },
        };
        let event = BusEvent::risk_alert(SubjectId::generate(), &alert, 15);
        assert_eq!(event.payload["evidence"]["ratio"], "0.95");
        assert_eq!(event.payload["evidence"]["trader"], "0xabc");
    }
}
