//! Oracle report aggregate.
//!
//! A report is an externally submitted claim about a subject, voted on by
//! trusted verification agents until quorum confirms or rejects it. The
//! aggregate is mutable only while pending; once finalized it never changes.

use crate::{ReportId, ReporterId, SubjectId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle state of a report.
///
/// Transitions only pending→confirmed or pending→rejected, never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl ReportStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One agent's recorded vote on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub approve: bool,
    /// The magnitude this voter stands behind (the report's unless overridden).
    pub magnitude: i32,
}

/// An externally submitted claim under quorum review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleReport {
    pub id: ReportId,
    pub subject_id: SubjectId,
    /// Claim category (e.g. "award", "scandal", "milestone").
    pub category: String,
    /// Where the claim was observed.
    pub source: String,
    pub headline: String,
    /// Claimed reputation impact, in [-100, 100].
    pub magnitude: i32,
    /// Submitter's confidence in the claim, in [0, 1].
    pub confidence: Decimal,
    pub status: ReportStatus,
    pub confirmations: u32,
    pub rejections: u32,
    pub required_confirmations: u32,
    /// Vote ledger keyed by reporter. A reporter appears at most once.
    pub votes: BTreeMap<ReporterId, VoteRecord>,
    pub created_at: DateTime<Utc>,
}

impl OracleReport {
    /// Create a pending report with the submitter auto-recorded as one
    /// approving vote.
    #[allow(clippy::too_many_arguments)]
    pub fn submitted(
        reporter: ReporterId,
        subject_id: SubjectId,
        category: String,
        source: String,
        headline: String,
        magnitude: i32,
        confidence: Decimal,
        required_confirmations: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut votes = BTreeMap::new();
        votes.insert(
            reporter,
            VoteRecord {
                approve: true,
                magnitude,
            },
        );
        Self {
            id: ReportId::generate(),
            subject_id,
            category,
            source,
            headline,
            magnitude,
            confidence,
            status: ReportStatus::Pending,
            confirmations: 1,
            rejections: 0,
            required_confirmations,
            votes,
            created_at,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_final()
    }

    pub fn has_voted(&self, reporter: &ReporterId) -> bool {
        self.votes.contains_key(reporter)
    }

    /// Number of distinct voters recorded in the ledger.
    pub fn distinct_voters(&self) -> u32 {
        self.votes.len() as u32
    }

    /// Total votes tallied so far.
    pub fn votes_cast(&self) -> u32 {
        self.confirmations + self.rejections
    }
}
