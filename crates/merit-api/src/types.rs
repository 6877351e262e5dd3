//! Request and response bodies.

use chrono::{DateTime, Utc};
use merit_core::{
    Amount, OracleReport, ReportStatus, ReporterId, TokenId, Trade, TraderAddress,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body for `POST /api/v1/oracle/reports/{id}/vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub reporter_id: ReporterId,
    pub approve: bool,
    /// Optional magnitude this voter stands behind instead of the report's.
    #[serde(default)]
    pub magnitude: Option<i32>,
}

/// Query string for `GET /api/v1/oracle/reports`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListReportsQuery {
    pub status: Option<ReportStatus>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Query string for `GET /api/v1/trading/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeHistoryQuery {
    pub token_id: Option<TokenId>,
    pub trader: Option<TraderAddress>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Body for `POST /api/v1/trading/buy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyRequest {
    pub token_id: TokenId,
    pub trader_address: TraderAddress,
    /// Settlement currency to spend, fee included.
    pub settlement_amount: Amount,
}

/// Body for `POST /api/v1/trading/sell`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub token_id: TokenId,
    pub trader_address: TraderAddress,
    pub token_amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<OracleReport>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeHistoryResponse {
    pub trades: Vec<Trade>,
    pub count: usize,
}

/// Active circuit breakers keyed by token, values are expiry instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerListResponse {
    pub active_breakers: BTreeMap<TokenId, DateTime<Utc>>,
    pub count: usize,
}
