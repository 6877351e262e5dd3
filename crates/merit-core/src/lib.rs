//! Core domain types for the merit market-integrity service.
//!
//! This crate provides fundamental types used throughout the service:
//! - `TokenId`, `SubjectId`, `ReporterId`, `TraderAddress`: identifier newtypes
//! - `Price`, `Amount`: precision-safe numeric types
//! - `Trade`: immutable trade ledger record
//! - `OracleReport`: quorum-voted claim aggregate
//! - `RiskAlert`: anomaly detection finding
//! - `Clock`: injectable time source for deterministic tests

pub mod clock;
pub mod decimal;
pub mod error;
pub mod ids;
pub mod report;
pub mod risk;
pub mod trade;
pub mod valuation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use decimal::{Amount, Price};
pub use error::{CoreError, Result};
pub use ids::{ReportId, ReporterId, SubjectId, TokenId, TraderAddress};
pub use report::{OracleReport, ReportStatus, VoteRecord};
pub use risk::{RiskAlert, RiskEvidence, RiskSeverity, RiskType};
pub use trade::{Trade, TradeSide};
pub use valuation::{SubjectRecord, TokenInfo, ValuationDetails, ValuationSnapshot, ValuationTrigger};
