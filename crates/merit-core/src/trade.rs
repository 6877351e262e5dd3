//! Trade ledger records.
//!
//! Trades are recorded facts, not matched orders: each row captures one
//! executed buy or sell against a token's current price. Rows are
//! append-only and never mutated.

use crate::{Amount, Price, TokenId, TraderAddress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Self::Sell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub token_id: TokenId,
    pub trader: TraderAddress,
    pub side: TradeSide,
    /// Quantity of reputation tokens exchanged.
    pub token_amount: Amount,
    /// Settlement currency paid (buy) or received (sell), before fees.
    pub settlement_amount: Amount,
    /// Unit price at execution.
    pub price: Price,
    /// Fee charged, in settlement currency.
    pub fee: Amount,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_id: TokenId,
        trader: TraderAddress,
        side: TradeSide,
        token_amount: Amount,
        settlement_amount: Amount,
        price: Price,
        fee: Amount,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            token_id,
            trader,
            side,
            token_amount,
            settlement_amount,
            price,
            fee,
            executed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_predicates() {
        assert!(TradeSide::Buy.is_buy());
        assert!(!TradeSide::Buy.is_sell());
        assert!(TradeSide::Sell.is_sell());
    }

    #[test]
    fn test_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&TradeSide::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_trade_new_assigns_id() {
        let t = Trade::new(
            TokenId::generate(),
            TraderAddress::from("0xabc"),
            TradeSide::Buy,
            Amount::new(dec!(100)),
            Amount::new(dec!(1)),
            Price::new(dec!(0.01)),
            Amount::new(dec!(0.01)),
            Utc::now(),
        );
        assert!(!t.id.is_nil());
        assert_eq!(t.side, TradeSide::Buy);
    }
}
