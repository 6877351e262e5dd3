//! Windowed trade-pattern detectors.
//!
//! Each detector is a pure function over one bounded trade window: it reads
//! a slice of trades (oldest first) and returns either `None` or a
//! `RiskAlert`. The orchestrator owns window retrieval; detectors never
//! touch storage.

use crate::config::RiskConfig;
use merit_core::{Amount, RiskAlert, RiskEvidence, RiskSeverity, RiskType, TokenId, Trade, TraderAddress};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Wash trading: near-symmetric round-trip volume by one trader.
///
/// A trader buying and selling almost the same token volume inside a short
/// window is fabricating activity by effectively trading with itself.
pub struct WashTradeDetector {
    config: RiskConfig,
}

impl WashTradeDetector {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Check one trader's window on one token.
    ///
    /// Requires at least two trades including one buy and one sell; fires
    /// (severity warning) when min/max volume ratio reaches the threshold.
    pub fn check(
        &self,
        token_id: TokenId,
        trader: &TraderAddress,
        trades: &[Trade],
    ) -> Option<RiskAlert> {
        if trades.len() < 2 {
            return None;
        }

        let has_buy = trades.iter().any(|t| t.side.is_buy());
        let has_sell = trades.iter().any(|t| t.side.is_sell());
        if !has_buy || !has_sell {
            return None;
        }

        let buy_volume: Amount = trades
            .iter()
            .filter(|t| t.side.is_buy())
            .map(|t| t.token_amount)
            .sum();
        let sell_volume: Amount = trades
            .iter()
            .filter(|t| t.side.is_sell())
            .map(|t| t.token_amount)
            .sum();

        let max = buy_volume.inner().max(sell_volume.inner());
        if max.is_zero() {
            return None;
        }
        let ratio = buy_volume.inner().min(sell_volume.inner()) / max;

        if ratio < self.config.wash_min_ratio {
            return None;
        }

        debug!(
            token_id = %token_id,
            trader = %trader,
            ratio = %ratio,
            "Wash trading pattern detected"
        );

        Some(RiskAlert {
            risk_type: RiskType::WashTrading,
            severity: RiskSeverity::Warning,
            token_id,
            evidence: RiskEvidence::WashTrading {
                trader: trader.clone(),
                buy_volume,
                sell_volume,
                ratio: ratio.round_dp(3),
                trade_count: trades.len(),
                window_seconds: self.config.wash_window_secs,
            },
        })
    }
}

/// Pump-and-dump: sharp price rise driven by concentrated buying.
///
/// Both conditions must hold jointly: the windowed price change reaches the
/// rise threshold AND the top wallets hold at least the configured share of
/// total buy volume.
pub struct PumpAndDumpDetector {
    config: RiskConfig,
}

impl PumpAndDumpDetector {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Check one token's window.
    pub fn check(&self, token_id: TokenId, trades: &[Trade]) -> Option<RiskAlert> {
        if trades.len() < 3 {
            return None;
        }

        let first = trades.first()?;
        let last = trades.last()?;
        // change_from is None off a non-positive base price
        let price_change = last.price.change_from(first.price)?;
        if price_change < self.config.pump_min_price_change {
            return None;
        }

        // Per-wallet buy volume in settlement currency
        let mut by_wallet: HashMap<&TraderAddress, Decimal> = HashMap::new();
        for trade in trades.iter().filter(|t| t.side.is_buy()) {
            *by_wallet.entry(&trade.trader).or_default() += trade.settlement_amount.inner();
        }
        if by_wallet.is_empty() {
            return None;
        }

        let total_buy: Decimal = by_wallet.values().copied().sum();
        if total_buy <= Decimal::ZERO {
            return None;
        }

        let mut volumes: Vec<(&TraderAddress, Decimal)> = by_wallet.into_iter().collect();
        volumes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        volumes.truncate(self.config.pump_top_wallets);

        let top_sum: Decimal = volumes.iter().map(|(_, v)| *v).sum();
        let concentration = top_sum / total_buy;
        if concentration < self.config.pump_min_concentration {
            return None;
        }

        debug!(
            token_id = %token_id,
            price_change = %price_change,
            concentration = %concentration,
            "Pump-and-dump pattern detected"
        );

        Some(RiskAlert {
            risk_type: RiskType::PumpAndDump,
            severity: RiskSeverity::Critical,
            token_id,
            evidence: RiskEvidence::PumpAndDump {
                price_change_pct: (price_change * Decimal::from(100)).round_dp(2),
                concentration_pct: (concentration * Decimal::from(100)).round_dp(2),
                top_wallets: volumes.into_iter().map(|(addr, _)| addr.clone()).collect(),
                trade_count: trades.len(),
                window_minutes: self.config.pump_window_minutes,
            },
        })
    }
}

/// Cliff event: sudden sharp price drop within a short window.
pub struct CliffEventDetector {
    config: RiskConfig,
}

impl CliffEventDetector {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Check one token's window.
    pub fn check(&self, token_id: TokenId, trades: &[Trade]) -> Option<RiskAlert> {
        if trades.len() < 2 {
            return None;
        }

        let first = trades.first()?;
        let last = trades.last()?;
        let price_change = last.price.change_from(first.price)?;
        // Fires when the drop reaches the (negative) threshold
        if price_change > self.config.cliff_max_price_change {
            return None;
        }

        let sell_volume: Amount = trades
            .iter()
            .filter(|t| t.side.is_sell())
            .map(|t| t.settlement_amount)
            .sum();

        debug!(
            token_id = %token_id,
            price_change = %price_change,
            "Cliff event detected"
        );

        Some(RiskAlert {
            risk_type: RiskType::CliffEvent,
            severity: RiskSeverity::Critical,
            token_id,
            evidence: RiskEvidence::CliffEvent {
                price_drop_pct: (price_change.abs() * Decimal::from(100)).round_dp(2),
                sell_volume: sell_volume.round_dp(4),
                trade_count: trades.len(),
                window_minutes: self.config.cliff_window_minutes,
            },
        })
    }
}
