//! Quorum settlement of oracle reports.
//!
//! Submission records the submitter as one approving vote, so a report is
//! born pending with a single confirmation. Each further vote re-evaluates
//! the tally: enough approvals confirm the report; once the remaining
//! eligible voters can no longer close the gap it is rejected. Finalized
//! reports never change again.

use crate::config::ConsensusConfig;
use crate::valuator::Valuator;
use crate::{OracleError, OracleResult};
use merit_bus::{BusEvent, EventBus};
use merit_core::{
    Clock, OracleReport, ReportId, ReportStatus, ReporterId, SubjectId, VoteRecord,
};
use merit_store::ReportStore;
use merit_telemetry::Metrics;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Input for a new report submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub reporter_id: ReporterId,
    pub subject_id: SubjectId,
    pub category: String,
    pub source: String,
    pub headline: String,
    pub magnitude: i32,
    pub confidence: Decimal,
}

/// Single decision-maker for report state transitions.
pub struct ConsensusEngine {
    reports: Arc<dyn ReportStore>,
    valuator: Arc<dyn Valuator>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    config: ConsensusConfig,
    /// Serializes the read-evaluate-write vote cycle so two concurrent
    /// votes cannot both act on the same stale tally.
    vote_lock: Mutex<()>,
}

impl ConsensusEngine {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        valuator: Arc<dyn Valuator>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
        config: ConsensusConfig,
    ) -> OracleResult<Self> {
        config.validate().map_err(OracleError::Validation)?;
        Ok(Self {
            reports,
            valuator,
            bus,
            clock,
            config,
            vote_lock: Mutex::new(()),
        })
    }

    /// Accept a new report. The submitter's approval is recorded
    /// immediately, so the report starts with one confirmation.
    pub fn submit(&self, submission: ReportSubmission) -> OracleResult<OracleReport> {
        validate_magnitude(submission.magnitude)?;
        if submission.confidence < Decimal::ZERO || submission.confidence > Decimal::ONE {
            return Err(OracleError::Validation(format!(
                "confidence {} outside [0, 1]",
                submission.confidence
            )));
        }

        let report = OracleReport::submitted(
            submission.reporter_id,
            submission.subject_id,
            submission.category,
            submission.source,
            submission.headline,
            submission.magnitude,
            submission.confidence,
            self.config.required_confirmations,
            self.clock.now(),
        );
        self.reports.insert(report.clone())?;
        Metrics::report_submitted();

        info!(
            report_id = %report.id,
            subject_id = %report.subject_id,
            magnitude = report.magnitude,
            "Report submitted"
        );
        self.bus.publish(BusEvent::report_pending(&report));

        Ok(report)
    }

    /// Record one reporter's vote and re-evaluate the quorum.
    ///
    /// A confirming vote settles the report and synchronously revalues the
    /// subject. A revaluation failure is logged but does not void the vote:
    /// the confirmed status has already been persisted and is never rolled
    /// back.
    pub fn vote(
        &self,
        report_id: ReportId,
        reporter: ReporterId,
        approve: bool,
        override_magnitude: Option<i32>,
    ) -> OracleResult<OracleReport> {
        if let Some(magnitude) = override_magnitude {
            validate_magnitude(magnitude)?;
        }

        let _guard = self.vote_lock.lock();

        let mut report = self
            .reports
            .get(report_id)?
            .ok_or(OracleError::NotFound(report_id))?;
        if report.is_finalized() {
            return Err(OracleError::Conflict(format!(
                "report {} already finalized as {}",
                report.id, report.status
            )));
        }
        if report.has_voted(&reporter) {
            return Err(OracleError::Conflict(format!(
                "reporter {} already voted on report {}",
                reporter, report.id
            )));
        }

        let magnitude = override_magnitude.unwrap_or(report.magnitude);
        report.votes.insert(reporter, VoteRecord { approve, magnitude });
        if approve {
            report.confirmations += 1;
        } else {
            report.rejections += 1;
        }
        self.evaluate(&mut report);
        self.reports.update(&report)?;
        Metrics::vote_cast(approve);

        match report.status {
            ReportStatus::Confirmed => {
                Metrics::report_finalized("confirmed");
                info!(
                    report_id = %report.id,
                    subject_id = %report.subject_id,
                    confirmations = report.confirmations,
                    "Report confirmed"
                );
                self.bus.publish(BusEvent::report_confirmed(&report));
                if let Err(err) = self.valuator.revalue(report.subject_id, &report) {
                    error!(
                        report_id = %report.id,
                        error = %err,
                        "Revaluation failed after confirmation"
                    );
                }
            }
            ReportStatus::Rejected => {
                Metrics::report_finalized("rejected");
                info!(
                    report_id = %report.id,
                    rejections = report.rejections,
                    "Report rejected, quorum unreachable"
                );
            }
            ReportStatus::Pending => {}
        }

        Ok(report)
    }

    pub fn get(&self, report_id: ReportId) -> OracleResult<OracleReport> {
        self.reports
            .get(report_id)?
            .ok_or(OracleError::NotFound(report_id))
    }

    pub fn list(
        &self,
        status: Option<ReportStatus>,
        limit: usize,
    ) -> OracleResult<Vec<OracleReport>> {
        Ok(self.reports.list(status, limit)?)
    }

    /// Confirm once the quorum is met; reject once even unanimous approval
    /// from the untallied remainder of the roster could not meet it.
    fn evaluate(&self, report: &mut OracleReport) {
        if report.confirmations >= report.required_confirmations {
            report.status = ReportStatus::Confirmed;
            return;
        }
        let remaining = self
            .config
            .eligible_voters
            .saturating_sub(report.votes_cast());
        if report.confirmations + remaining < report.required_confirmations {
            report.status = ReportStatus::Rejected;
        }
    }
}

fn validate_magnitude(magnitude: i32) -> OracleResult<()> {
    if !(-100..=100).contains(&magnitude) {
        return Err(OracleError::Validation(format!(
            "magnitude {} outside [-100, 100]",
            magnitude
        )));
    }
    Ok(())
}
