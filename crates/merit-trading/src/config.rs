//! Trading tunables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Fee taken on the settlement leg of every trade, as a fraction.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,
}

fn default_fee_rate() -> Decimal {
    dec!(0.01)
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            fee_rate: default_fee_rate(),
        }
    }
}

impl TradingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.fee_rate < Decimal::ZERO || self.fee_rate >= Decimal::ONE {
            return Err(format!("fee_rate {} outside [0, 1)", self.fee_rate));
        }
        Ok(())
    }
}
