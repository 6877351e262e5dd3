//! Risk detection configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds and windows for the three detectors plus the breaker pause.
///
/// All thresholds are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Wash trading lookback in seconds.
    #[serde(default = "default_wash_window_secs")]
    pub wash_window_secs: u64,
    /// Minimum buy/sell volume symmetry ratio to flag wash trading.
    #[serde(default = "default_wash_min_ratio")]
    pub wash_min_ratio: Decimal,
    /// Pump-and-dump lookback in minutes.
    #[serde(default = "default_pump_window_minutes")]
    pub pump_window_minutes: u64,
    /// Minimum fractional price rise over the window.
    #[serde(default = "default_pump_min_price_change")]
    pub pump_min_price_change: Decimal,
    /// Minimum share of buy volume held by the top wallets.
    #[serde(default = "default_pump_min_concentration")]
    pub pump_min_concentration: Decimal,
    /// How many top wallets count toward the concentration share.
    #[serde(default = "default_pump_top_wallets")]
    pub pump_top_wallets: usize,
    /// Cliff lookback in minutes.
    #[serde(default = "default_cliff_window_minutes")]
    pub cliff_window_minutes: u64,
    /// Maximum fractional price change before a drop counts as a cliff
    /// (negative number).
    #[serde(default = "default_cliff_max_price_change")]
    pub cliff_max_price_change: Decimal,
    /// How long a tripped breaker pauses trading, in minutes.
    #[serde(default = "default_pause_minutes")]
    pub pause_minutes: u64,
    /// Lookback for the per-token risk summary, in minutes.
    #[serde(default = "default_summary_window_minutes")]
    pub summary_window_minutes: u64,
}

fn default_wash_window_secs() -> u64 {
    300
}

fn default_wash_min_ratio() -> Decimal {
    dec!(0.8)
}

fn default_pump_window_minutes() -> u64 {
    60
}

fn default_pump_min_price_change() -> Decimal {
    dec!(0.5)
}

fn default_pump_min_concentration() -> Decimal {
    dec!(0.7)
}

fn default_pump_top_wallets() -> usize {
    3
}

fn default_cliff_window_minutes() -> u64 {
    10
}

fn default_cliff_max_price_change() -> Decimal {
    dec!(-0.3)
}

fn default_pause_minutes() -> u64 {
    15
}

fn default_summary_window_minutes() -> u64 {
    60
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            wash_window_secs: 300,
            wash_min_ratio: dec!(0.8),
            pump_window_minutes: 60,
            pump_min_price_change: dec!(0.5),
            pump_min_concentration: dec!(0.7),
            pump_top_wallets: 3,
            cliff_window_minutes: 10,
            cliff_max_price_change: dec!(-0.3),
            pause_minutes: 15,
            summary_window_minutes: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: RiskConfig = serde_json::from_str(r#"{"wash_window_secs": 120}"#).unwrap();
        assert_eq!(config.wash_window_secs, 120);
        assert_eq!(config.wash_min_ratio, dec!(0.8));
        assert_eq!(config.pause_minutes, 15);
        assert_eq!(config.cliff_max_price_change, dec!(-0.3));
    }
}
