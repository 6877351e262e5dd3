//! Oracle report storage.

use crate::StoreResult;
use merit_core::{OracleReport, ReportId, ReportStatus, SubjectId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Durable report rows.
pub trait ReportStore: Send + Sync {
    fn insert(&self, report: OracleReport) -> StoreResult<()>;

    fn get(&self, id: ReportId) -> StoreResult<Option<OracleReport>>;

    /// Persist the current state of an existing report.
    fn update(&self, report: &OracleReport) -> StoreResult<()>;

    /// Reports newest first, optionally filtered by status.
    fn list(&self, status: Option<ReportStatus>, limit: usize) -> StoreResult<Vec<OracleReport>>;

    /// All confirmed reports about one subject, oldest first.
    fn confirmed_for_subject(&self, subject_id: SubjectId) -> StoreResult<Vec<OracleReport>>;
}

/// In-memory report store.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<ReportId, OracleReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn insert(&self, report: OracleReport) -> StoreResult<()> {
        self.reports.write().insert(report.id, report);
        Ok(())
    }

    fn get(&self, id: ReportId) -> StoreResult<Option<OracleReport>> {
        Ok(self.reports.read().get(&id).cloned())
    }

    fn update(&self, report: &OracleReport) -> StoreResult<()> {
        self.reports.write().insert(report.id, report.clone());
        Ok(())
    }

    fn list(&self, status: Option<ReportStatus>, limit: usize) -> StoreResult<Vec<OracleReport>> {
        let reports = self.reports.read();
        let mut matched: Vec<OracleReport> = reports
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);
        Ok(matched)
    }

    fn confirmed_for_subject(&self, subject_id: SubjectId) -> StoreResult<Vec<OracleReport>> {
        let reports = self.reports.read();
        let mut matched: Vec<OracleReport> = reports
            .values()
            .filter(|r| r.subject_id == subject_id && r.status == ReportStatus::Confirmed)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.created_at);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use merit_core::ReporterId;
    use rust_decimal_macros::dec;

    fn make_report(subject_id: SubjectId, magnitude: i32, age_secs: i64) -> OracleReport {
        OracleReport::submitted(
            ReporterId::from("agent_alpha"),
            subject_id,
            "news".to_string(),
            "wire".to_string(),
            "headline".to_string(),
            magnitude,
            dec!(0.8),
            2,
            Utc::now() - Duration::seconds(age_secs),
        )
    }

    #[test]
    fn test_insert_get_update() {
        let store = InMemoryReportStore::new();
        let subject = SubjectId::generate();
        let mut report = make_report(subject, 10, 0);
        let id = report.id;

        store.insert(report.clone()).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().magnitude, 10);

        report.confirmations = 2;
        report.status = ReportStatus::Confirmed;
        store.update(&report).unwrap();
        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.confirmations, 2);
        assert_eq!(stored.status, ReportStatus::Confirmed);
    }

    #[test]
    fn test_list_newest_first_with_status_filter() {
        let store = InMemoryReportStore::new();
        let subject = SubjectId::generate();

        let old = make_report(subject, 10, 60);
        let mut confirmed = make_report(subject, 20, 30);
        confirmed.status = ReportStatus::Confirmed;
        let fresh = make_report(subject, 30, 0);

        store.insert(old).unwrap();
        store.insert(confirmed).unwrap();
        store.insert(fresh.clone()).unwrap();

        let all = store.list(None, 10).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, fresh.id);

        let pending = store.list(Some(ReportStatus::Pending), 10).unwrap();
        assert_eq!(pending.len(), 2);

        let capped = store.list(None, 1).unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn test_confirmed_for_subject_excludes_other_subjects() {
        let store = InMemoryReportStore::new();
        let subject = SubjectId::generate();
        let other = SubjectId::generate();

        let mut a = make_report(subject, 10, 20);
        a.status = ReportStatus::Confirmed;
        let mut b = make_report(other, 10, 10);
        b.status = ReportStatus::Confirmed;
        let pending = make_report(subject, 10, 0);

        store.insert(a).unwrap();
        store.insert(b).unwrap();
        store.insert(pending).unwrap();

        let confirmed = store.confirmed_for_subject(subject).unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].subject_id, subject);
    }
}
