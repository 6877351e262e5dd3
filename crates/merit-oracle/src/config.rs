//! Consensus and valuation tunables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Quorum parameters for report settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Approvals needed to confirm a report. The submitter's implicit
    /// approval counts toward this.
    #[serde(default = "default_required_confirmations")]
    pub required_confirmations: u32,

    /// Size of the reporter roster eligible to vote on any report. Used to
    /// decide when the quorum has become unreachable.
    #[serde(default = "default_eligible_voters")]
    pub eligible_voters: u32,
}

fn default_required_confirmations() -> u32 {
    2
}

fn default_eligible_voters() -> u32 {
    3
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            required_confirmations: default_required_confirmations(),
            eligible_voters: default_eligible_voters(),
        }
    }
}

impl ConsensusConfig {
    /// A roster smaller than the quorum would leave every report stuck
    /// pending forever.
    pub fn validate(&self) -> Result<(), String> {
        if self.required_confirmations == 0 {
            return Err("required_confirmations must be at least 1".to_string());
        }
        if self.eligible_voters < self.required_confirmations {
            return Err(format!(
                "eligible_voters ({}) must be >= required_confirmations ({})",
                self.eligible_voters, self.required_confirmations
            ));
        }
        Ok(())
    }
}

/// Parameters for the sentiment valuator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuatorConfig {
    /// Fair value of a subject at neutral sentiment 1.0 would map to this.
    #[serde(default = "default_baseline_valuation")]
    pub baseline_valuation: Decimal,

    /// Minimum relative score move (percent) before a valuation_changed
    /// event is published.
    #[serde(default = "default_change_threshold_pct")]
    pub change_threshold_pct: Decimal,
}

fn default_baseline_valuation() -> Decimal {
    dec!(1000)
}

fn default_change_threshold_pct() -> Decimal {
    dec!(5)
}

impl Default for ValuatorConfig {
    fn default() -> Self {
        Self {
            baseline_valuation: default_baseline_valuation(),
            change_threshold_pct: default_change_threshold_pct(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ConsensusConfig::default();
        assert_eq!(config.required_confirmations, 2);
        assert_eq!(config.eligible_voters, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ConsensusConfig =
            serde_json::from_str(r#"{"eligible_voters": 5}"#).unwrap();
        assert_eq!(config.required_confirmations, 2);
        assert_eq!(config.eligible_voters, 5);
    }

    #[test]
    fn undersized_roster_rejected() {
        let config = ConsensusConfig {
            required_confirmations: 4,
            eligible_voters: 3,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn valuator_defaults() {
        let config = ValuatorConfig::default();
        assert_eq!(config.baseline_valuation, dec!(1000));
        assert_eq!(config.change_threshold_pct, dec!(5));
    }
}
