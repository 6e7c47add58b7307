// crates/server/src/scans/store.rs
//! In-memory table from scan identifier to scan record.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::record::{ScanRecord, ScanState};

/// Process-wide scan table.
///
/// Written by submissions (pending insert) and completion tasks (terminal
/// write), read by status handlers at arbitrary concurrency. Uses
/// `std::sync::RwLock` (not `tokio::sync::RwLock`) because no guard is ever
/// held across an `.await` point: every access is one short critical section.
pub struct ScanStore {
    records: RwLock<HashMap<String, ScanRecord>>,
}

impl ScanStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a fresh `Pending` record at submission time.
    pub fn insert_pending(&self, id: &str, name: &str) {
        match self.records.write() {
            Ok(mut records) => {
                records.insert(id.to_string(), ScanRecord::pending(id, name));
            }
            Err(e) => tracing::error!("RwLock poisoned inserting scan record: {e}"),
        }
    }

    /// Transition a record to `Finished`.
    ///
    /// Both terminal fields land in a single store mutation under the write
    /// lock; a concurrent reader sees either the pending record or the
    /// complete terminal one, never something in between.
    pub fn mark_finished(&self, id: &str, artifact_url: String, processed_at: DateTime<Utc>) {
        self.transition(
            id,
            ScanState::Finished {
                artifact_url,
                processed_at,
            },
        );
    }

    /// Transition a record to `Failed` with the task's error text.
    pub fn mark_failed(&self, id: &str, error: impl Into<String>) {
        self.transition(
            id,
            ScanState::Failed {
                error: error.into(),
            },
        );
    }

    fn transition(&self, id: &str, state: ScanState) {
        match self.records.write() {
            Ok(mut records) => match records.get_mut(id) {
                Some(record) if record.state.is_terminal() => {
                    tracing::warn!(scan_id = %id, "ignoring transition out of terminal state");
                }
                Some(record) => record.state = state,
                None => tracing::warn!(scan_id = %id, "transition for unknown scan id"),
            },
            Err(e) => tracing::error!("RwLock poisoned updating scan record: {e}"),
        }
    }

    /// Snapshot of a record, if one exists.
    pub fn get(&self, id: &str) -> Option<ScanRecord> {
        match self.records.read() {
            Ok(records) => records.get(id).cloned(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading scan records: {e}");
                None
            }
        }
    }
}

impl Default for ScanStore {
    fn default() -> Self {
        Self::new()
    }
}
