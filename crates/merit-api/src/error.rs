//! Engine error to HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use merit_oracle::OracleError;
use merit_risk::RiskError;
use merit_trading::TradeError;
use serde_json::json;
use tracing::error;

/// Error as it leaves the API: a status code and a JSON body of the form
/// `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 500 with the detail logged rather than leaked to the client.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "Internal error on API path");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<OracleError> for ApiError {
    fn from(err: OracleError) -> Self {
        match &err {
            OracleError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            OracleError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            OracleError::Conflict(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            OracleError::Store(_) => Self::internal(err),
        }
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        match &err {
            TradeError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            TradeError::TokenNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            TradeError::TradingLocked(_) => Self::new(StatusCode::LOCKED, err.to_string()),
            TradeError::Store(_) => Self::internal(err),
        }
    }
}

impl From<RiskError> for ApiError {
    fn from(err: RiskError) -> Self {
        match &err {
            RiskError::UnknownToken(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            RiskError::Store(_) => Self::internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::TokenId;

    #[test]
    fn test_status_mapping() {
        let api: ApiError = OracleError::Validation("bad magnitude".to_string()).into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);

        let api: ApiError = OracleError::Conflict("already voted".to_string()).into();
        assert_eq!(api.status, StatusCode::CONFLICT);

        let api: ApiError = TradeError::TradingLocked(TokenId::generate()).into();
        assert_eq!(api.status, StatusCode::LOCKED);

        let api: ApiError = TradeError::TokenNotFound(TokenId::generate()).into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_hides_detail() {
        let api = ApiError::internal("connection pool exhausted");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "internal error");
    }
}
