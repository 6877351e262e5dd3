//! Valuation and subject records.
//!
//! Snapshots are append-only audit rows written each time a subject is
//! revalued; the subject record carries the current composite score.

use crate::{Amount, Price, ReportId, SubjectId, TokenId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What caused a revaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationTrigger {
    /// A confirmed oracle report.
    OracleReport,
}

/// Sentiment tally backing one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationDetails {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub sentiment: Decimal,
}

/// Append-only audit row produced on each revaluation. Never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub id: Uuid,
    pub subject_id: SubjectId,
    /// Composite reputation score in [0, 100].
    pub score: Decimal,
    /// Fair value of the subject's token, in settlement currency.
    pub fair_value: Amount,
    pub trigger: ValuationTrigger,
    pub trigger_report_id: ReportId,
    pub details: ValuationDetails,
    pub computed_at: DateTime<Utc>,
}

/// Current valuation state of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub subject_id: SubjectId,
    pub score: Decimal,
    pub fair_value: Amount,
    pub updated_at: DateTime<Utc>,
}

impl SubjectRecord {
    /// Fresh record with the neutral starting score.
    pub fn new(subject_id: SubjectId, now: DateTime<Utc>) -> Self {
        Self {
            subject_id,
            score: Decimal::from(50),
            fair_value: Amount::ZERO,
            updated_at: now,
        }
    }
}

/// Directory entry for one tradeable reputation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub subject_id: SubjectId,
    /// Display symbol (e.g. "RPT-ALPHA").
    pub symbol: String,
    /// Current unit price in settlement currency.
    pub price: Price,
}
