//! Subject valuation state.
//!
//! Score updates and snapshot appends happen under one lock so readers never
//! observe a score without its audit row.

use crate::StoreResult;
use merit_core::{SubjectId, SubjectRecord, ValuationSnapshot};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Subject score fields plus the snapshot audit trail.
pub trait SubjectStore: Send + Sync {
    fn get(&self, id: SubjectId) -> StoreResult<Option<SubjectRecord>>;

    /// Atomically update the subject's score fields and append the snapshot.
    /// Creates the subject record if it does not exist yet. Returns the
    /// updated record.
    fn record_valuation(&self, snapshot: &ValuationSnapshot) -> StoreResult<SubjectRecord>;

    /// Snapshot history for one subject, oldest first.
    fn snapshots(&self, id: SubjectId) -> StoreResult<Vec<ValuationSnapshot>>;
}

#[derive(Debug, Default)]
struct SubjectState {
    records: HashMap<SubjectId, SubjectRecord>,
    snapshots: HashMap<SubjectId, Vec<ValuationSnapshot>>,
}

/// In-memory subject store.
#[derive(Debug, Default)]
pub struct InMemorySubjectStore {
    state: RwLock<SubjectState>,
}

impl InMemorySubjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubjectStore for InMemorySubjectStore {
    fn get(&self, id: SubjectId) -> StoreResult<Option<SubjectRecord>> {
        Ok(self.state.read().records.get(&id).cloned())
    }

    fn record_valuation(&self, snapshot: &ValuationSnapshot) -> StoreResult<SubjectRecord> {
        let mut state = self.state.write();
        let record = state
            .records
            .entry(snapshot.subject_id)
            .or_insert_with(|| SubjectRecord::new(snapshot.subject_id, snapshot.computed_at));
        record.score = snapshot.score;
        record.fair_value = snapshot.fair_value;
        record.updated_at = snapshot.computed_at;
        let updated = record.clone();
        state
            .snapshots
            .entry(snapshot.subject_id)
            .or_default()
            .push(snapshot.clone());
        Ok(updated)
    }

    fn snapshots(&self, id: SubjectId) -> StoreResult<Vec<ValuationSnapshot>> {
        Ok(self
            .state
            .read()
            .snapshots
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use merit_core::{Amount, ReportId, ValuationDetails, ValuationTrigger};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_snapshot(subject_id: SubjectId, score: rust_decimal::Decimal) -> ValuationSnapshot {
        ValuationSnapshot {
            id: Uuid::new_v4(),
            subject_id,
            score,
            fair_value: Amount::new(dec!(650)),
            trigger: ValuationTrigger::OracleReport,
            trigger_report_id: ReportId::generate(),
            details: ValuationDetails {
                positive: 2,
                negative: 0,
                neutral: 1,
                sentiment: dec!(0.7),
            },
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_valuation_creates_record_and_appends() {
        let store = InMemorySubjectStore::new();
        let subject = SubjectId::generate();
        assert!(store.get(subject).unwrap().is_none());

        let updated = store
            .record_valuation(&make_snapshot(subject, dec!(65)))
            .unwrap();
        assert_eq!(updated.score, dec!(65));
        assert_eq!(store.snapshots(subject).unwrap().len(), 1);
    }

    #[test]
    fn test_record_valuation_appends_never_overwrites() {
        let store = InMemorySubjectStore::new();
        let subject = SubjectId::generate();

        store
            .record_valuation(&make_snapshot(subject, dec!(65)))
            .unwrap();
        store
            .record_valuation(&make_snapshot(subject, dec!(70)))
            .unwrap();

        let snapshots = store.snapshots(subject).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(store.get(subject).unwrap().unwrap().score, dec!(70));
    }
}
