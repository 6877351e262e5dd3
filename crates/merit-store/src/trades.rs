//! Trade ledger storage.

use crate::StoreResult;
use chrono::{DateTime, Utc};
use merit_core::{TokenId, Trade, TraderAddress};
use parking_lot::RwLock;

/// Append-only trade ledger.
pub trait TradeStore: Send + Sync {
    /// Record one executed trade.
    fn insert(&self, trade: Trade) -> StoreResult<()>;

    /// Trades on `token_id` since `since`, oldest first. When `trader` is
    /// given, only that counterparty's trades.
    fn query(
        &self,
        token_id: TokenId,
        trader: Option<&TraderAddress>,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<Trade>>;

    /// Most recent trades, newest first, optionally filtered.
    fn recent(
        &self,
        token_id: Option<TokenId>,
        trader: Option<&TraderAddress>,
        limit: usize,
    ) -> StoreResult<Vec<Trade>>;
}

/// In-memory trade ledger.
#[derive(Debug, Default)]
pub struct InMemoryTradeStore {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trades.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.read().is_empty()
    }
}

impl TradeStore for InMemoryTradeStore {
    fn insert(&self, trade: Trade) -> StoreResult<()> {
        self.trades.write().push(trade);
        Ok(())
    }

    fn query(
        &self,
        token_id: TokenId,
        trader: Option<&TraderAddress>,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<Trade>> {
        let trades = self.trades.read();
        let mut matched: Vec<Trade> = trades
            .iter()
            .filter(|t| t.token_id == token_id)
            .filter(|t| trader.map_or(true, |addr| &t.trader == addr))
            .filter(|t| t.executed_at >= since)
            .cloned()
            .collect();
        matched.sort_by_key(|t| t.executed_at);
        Ok(matched)
    }

    fn recent(
        &self,
        token_id: Option<TokenId>,
        trader: Option<&TraderAddress>,
        limit: usize,
    ) -> StoreResult<Vec<Trade>> {
        let trades = self.trades.read();
        let mut matched: Vec<Trade> = trades
            .iter()
            .filter(|t| token_id.map_or(true, |id| t.token_id == id))
            .filter(|t| trader.map_or(true, |addr| &t.trader == addr))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        matched.truncate(limit);
        Ok(matched)
    }
}
