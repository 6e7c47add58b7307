// crates/server/src/scans/record.rs
//! The scan record and its state machine.

use chrono::{DateTime, Utc};

/// Processing state of a submitted scan.
///
/// Terminal data lives on the variants: a record can only be `Finished` with
/// both the artifact URL and the completion timestamp present, so readers
/// never observe a half-populated terminal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Accepted; the background task has not completed yet.
    Pending,
    /// The artifact exists on disk and the record is immutable from here on.
    Finished {
        artifact_url: String,
        processed_at: DateTime<Utc>,
    },
    /// The background task failed; kept so the failure is reportable.
    Failed { error: String },
}

impl ScanState {
    /// True for states no transition leaves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScanState::Pending)
    }
}

/// One client-submitted batch of images plus its processing outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    pub id: String,
    pub name: String,
    pub state: ScanState,
}

impl ScanRecord {
    /// Fresh record at submission time.
    pub fn pending(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: ScanState::Pending,
        }
    }
}
