//! Route table and REST handlers.

use crate::types::{
    BreakerListResponse, BuyRequest, ListReportsQuery, ReportListResponse, SellRequest,
    TradeHistoryQuery, TradeHistoryResponse, VoteRequest,
};
use crate::ws::ws_handler;
use crate::{ApiError, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use merit_core::{OracleReport, ReportId, TokenId};
use merit_risk::TokenRiskSummary;
use merit_trading::TradeExecution;
use prometheus::Encoder;
use serde_json::json;
use tower_http::cors::CorsLayer;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/oracle/reports", post(submit_report).get(list_reports))
        .route("/oracle/reports/{id}", get(get_report))
        .route("/oracle/reports/{id}/vote", post(vote_report))
        .route("/risk/circuit-breakers", get(list_breakers))
        .route("/risk/tokens/{id}", get(token_risk))
        .route("/trading/buy", post(buy))
        .route("/trading/sell", post(sell))
        .route("/trading/history", get(trade_history))
        .route("/events/ws", get(ws_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn submit_report(
    State(state): State<AppState>,
    Json(submission): Json<merit_oracle::ReportSubmission>,
) -> Result<(StatusCode, Json<OracleReport>), ApiError> {
    let report = state.consensus.submit(submission)?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<Json<OracleReport>, ApiError> {
    Ok(Json(state.consensus.get(id)?))
}

async fn vote_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<OracleReport>, ApiError> {
    let report = state
        .consensus
        .vote(id, req.reporter_id, req.approve, req.magnitude)?;
    Ok(Json(report))
}

async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ReportListResponse>, ApiError> {
    let reports = state.consensus.list(query.status, query.limit)?;
    let count = reports.len();
    Ok(Json(ReportListResponse { reports, count }))
}

async fn list_breakers(State(state): State<AppState>) -> Json<BreakerListResponse> {
    let active_breakers = state.risk.breaker().list_active();
    let count = active_breakers.len();
    Json(BreakerListResponse {
        active_breakers,
        count,
    })
}

async fn token_risk(
    State(state): State<AppState>,
    Path(id): Path<TokenId>,
) -> Result<Json<TokenRiskSummary>, ApiError> {
    Ok(Json(state.risk.token_summary(id)?))
}

async fn buy(
    State(state): State<AppState>,
    Json(req): Json<BuyRequest>,
) -> Result<Json<TradeExecution>, ApiError> {
    let execution = state
        .trading
        .buy(req.token_id, req.trader_address, req.settlement_amount)?;
    Ok(Json(execution))
}

async fn sell(
    State(state): State<AppState>,
    Json(req): Json<SellRequest>,
) -> Result<Json<TradeExecution>, ApiError> {
    let execution = state
        .trading
        .sell(req.token_id, req.trader_address, req.token_amount)?;
    Ok(Json(execution))
}

async fn trade_history(
    State(state): State<AppState>,
    Query(query): Query<TradeHistoryQuery>,
) -> Result<Json<TradeHistoryResponse>, ApiError> {
    let trades = state
        .trading
        .history(query.token_id, query.trader.as_ref(), query.limit)?;
    let count = trades.len();
    Ok(Json(TradeHistoryResponse { trades, count }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Text exposition of the default prometheus registry.
async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(ApiError::internal)?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], buffer))
}
