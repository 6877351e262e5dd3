//! Risk alert value objects.
//!
//! Alerts are transient: they are surfaced on the event bus and may trip a
//! circuit breaker, but are never persisted as rows.

use crate::{Amount, TokenId, TraderAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anomaly pattern that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    WashTrading,
    PumpAndDump,
    CliffEvent,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WashTrading => "wash_trading",
            Self::PumpAndDump => "pump_and_dump",
            Self::CliffEvent => "cliff_event",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How severe a finding is. Only critical findings trip the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Warning,
    Critical,
}

impl RiskSeverity {
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detector-specific supporting data for an alert.
///
/// Serialized untagged so the evidence appears as a flat object in bus
/// payloads; the alert's `risk_type` disambiguates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskEvidence {
    WashTrading {
        trader: TraderAddress,
        buy_volume: Amount,
        sell_volume: Amount,
        /// min(buy, sell) / max(buy, sell) volume ratio.
        ratio: Decimal,
        trade_count: usize,
        window_seconds: u64,
    },
    PumpAndDump {
        price_change_pct: Decimal,
        /// Share of buy volume held by the top three wallets, in percent.
        concentration_pct: Decimal,
        top_wallets: Vec<TraderAddress>,
        trade_count: usize,
        window_minutes: u64,
    },
    CliffEvent {
        /// Magnitude of the drop, in percent (positive number).
        price_drop_pct: Decimal,
        sell_volume: Amount,
        trade_count: usize,
        window_minutes: u64,
    },
}

/// One anomaly finding on a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub token_id: TokenId,
    pub evidence: RiskEvidence,
}

impl RiskAlert {
    pub fn is_critical(&self) -> bool {
        self.severity.is_critical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RiskType::WashTrading).unwrap(),
            "\"wash_trading\""
        );
        assert_eq!(
            serde_json::to_string(&RiskType::PumpAndDump).unwrap(),
            "\"pump_and_dump\""
        );
    }

    #[test]
    fn test_evidence_serializes_flat() {
        let evidence = RiskEvidence::CliffEvent {
            price_drop_pct: dec!(42.11),
            sell_volume: Amount::new(dec!(12.5)),
            trade_count: 4,
            window_minutes: 10,
        };
        let json = serde_json::to_value(&evidence).unwrap();
        assert_eq!(json["price_drop_pct"], "42.11");
        assert_eq!(json["trade_count"], 4);
    }

    #[test]
    fn test_only_critical_is_critical() {
        assert!(RiskSeverity::Critical.is_critical());
        assert!(!RiskSeverity::Warning.is_critical());
    }
}
