//! Duplicate collapsing and session grouping.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tradeconv_core::TradeRecord;

/// Drop records whose dedupe key was already seen. The first occurrence wins
/// and the relative order of survivors is kept.
pub fn dedupe(records: Vec<TradeRecord>) -> Vec<TradeRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.dedupe_key()))
        .collect()
}

/// Group records by the calendar date of their reference-zone timestamp.
///
/// Records keep their incoming order inside a session; nothing is re-sorted.
pub fn group_by_session(records: Vec<TradeRecord>) -> BTreeMap<NaiveDate, Vec<TradeRecord>> {
    let mut sessions: BTreeMap<NaiveDate, Vec<TradeRecord>> = BTreeMap::new();
    for record in records {
        sessions.entry(record.session_date()).or_default().push(record);
    }
    sessions
}
