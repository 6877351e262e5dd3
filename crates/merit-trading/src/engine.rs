//! Buy and sell execution against the token directory.

use crate::{TradeError, TradeResult, TradingConfig};
use chrono::{DateTime, Utc};
use merit_core::{Amount, Clock, Price, TokenId, Trade, TradeSide, TraderAddress};
use merit_risk::RiskOrchestrator;
use merit_store::{TokenDirectory, TradeStore};
use merit_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Committed trade as returned to the caller.
///
/// `settlement_amount` is the notional crossed at the executed price
/// (`token_amount * price`); the fee sits on top of it for buys and comes
/// out of it for sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeExecution {
    pub trade_id: Uuid,
    pub token_id: TokenId,
    pub side: TradeSide,
    pub token_amount: Amount,
    pub settlement_amount: Amount,
    pub fee: Amount,
    pub price: Price,
    pub executed_at: DateTime<Utc>,
}

impl TradeExecution {
    fn from_trade(trade: &Trade) -> Self {
        Self {
            trade_id: trade.id,
            token_id: trade.token_id,
            side: trade.side,
            token_amount: trade.token_amount,
            settlement_amount: trade.settlement_amount,
            fee: trade.fee,
            price: trade.price,
            executed_at: trade.executed_at,
        }
    }
}

/// Executes trades and kicks off the post-trade risk pass.
pub struct TradeEngine {
    tokens: Arc<dyn TokenDirectory>,
    trades: Arc<dyn TradeStore>,
    orchestrator: Arc<RiskOrchestrator>,
    clock: Arc<dyn Clock>,
    config: TradingConfig,
}

impl TradeEngine {
    pub fn new(
        tokens: Arc<dyn TokenDirectory>,
        trades: Arc<dyn TradeStore>,
        orchestrator: Arc<RiskOrchestrator>,
        clock: Arc<dyn Clock>,
        config: TradingConfig,
    ) -> Self {
        Self {
            tokens,
            trades,
            orchestrator,
            clock,
            config,
        }
    }

    /// Spend `settlement_amount` of settlement currency on the token. The
    /// fee comes off the spend before pricing, so the tokens received are
    /// `(settlement_amount - fee) / price`.
    pub fn buy(
        &self,
        token_id: TokenId,
        trader: TraderAddress,
        settlement_amount: Amount,
    ) -> TradeResult<TradeExecution> {
        if !settlement_amount.is_positive() {
            return Err(TradeError::Validation(format!(
                "settlement amount {} must be positive",
                settlement_amount
            )));
        }
        let price = self.quote(token_id)?;

        let fee = settlement_amount * self.config.fee_rate;
        let notional = settlement_amount - fee;
        let token_amount = notional / price;

        self.commit(Trade::new(
            token_id,
            trader,
            TradeSide::Buy,
            token_amount,
            notional,
            price,
            fee,
            self.clock.now(),
        ))
    }

    /// Sell `token_amount` tokens at the directory price. The fee comes out
    /// of the proceeds, so the seller nets `settlement_amount - fee`.
    pub fn sell(
        &self,
        token_id: TokenId,
        trader: TraderAddress,
        token_amount: Amount,
    ) -> TradeResult<TradeExecution> {
        if !token_amount.is_positive() {
            return Err(TradeError::Validation(format!(
                "token amount {} must be positive",
                token_amount
            )));
        }
        let price = self.quote(token_id)?;

        let notional = token_amount * price;
        let fee = notional * self.config.fee_rate;

        self.commit(Trade::new(
            token_id,
            trader,
            TradeSide::Sell,
            token_amount,
            notional,
            price,
            fee,
            self.clock.now(),
        ))
    }

    /// Recent trades, newest first, optionally narrowed to a token or a
    /// trader.
    pub fn history(
        &self,
        token_id: Option<TokenId>,
        trader: Option<&TraderAddress>,
        limit: usize,
    ) -> TradeResult<Vec<Trade>> {
        Ok(self.trades.recent(token_id, trader, limit)?)
    }

    /// Resolve the executable price, refusing unknown tokens and tokens
    /// under an active breaker.
    fn quote(&self, token_id: TokenId) -> TradeResult<Price> {
        let info = self
            .tokens
            .get(token_id)
            .ok_or(TradeError::TokenNotFound(token_id))?;
        if self.orchestrator.breaker().is_active(token_id) {
            Metrics::trade_blocked();
            return Err(TradeError::TradingLocked(token_id));
        }
        if !info.price.is_positive() {
            return Err(TradeError::Validation(format!(
                "token {} has no positive price",
                token_id
            )));
        }
        Ok(info.price)
    }

    fn commit(&self, trade: Trade) -> TradeResult<TradeExecution> {
        self.trades.insert(trade.clone())?;
        Metrics::trade_executed(trade.side.as_str());

        info!(
            trade_id = %trade.id,
            token_id = %trade.token_id,
            side = %trade.side,
            token_amount = %trade.token_amount,
            settlement_amount = %trade.settlement_amount,
            "Trade committed"
        );

        // Detached by design: the response must not wait on detection.
        self.orchestrator
            .spawn_post_trade(trade.token_id, trade.trader.clone());

        Ok(TradeExecution::from_trade(&trade))
    }
}
