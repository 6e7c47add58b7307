// crates/server/src/scans/processor.rs
//! Scan lifecycle manager: submission, background completion, failure marking.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use super::store::ScanStore;
use crate::storage::{ScanStorage, StorageError, ARTIFACT_FILE};

/// Stand-in artifact body written by the simulated pipeline.
// TODO: replace with the output of the real photogrammetry pipeline.
const PLACEHOLDER_ARTIFACT: &[u8] = b" ";

/// Drives a scan from submission to its terminal state.
///
/// One background task is spawned per submission, unbounded — there is no
/// worker pool or queue, and no admission control. The spawned wrapper
/// observes the task's outcome: a failed task marks the record `Failed`
/// instead of leaving it pending forever.
pub struct ScanProcessor {
    store: Arc<ScanStore>,
    storage: Arc<ScanStorage>,
    delay: Duration,
    public_url: String,
}

impl ScanProcessor {
    pub fn new(
        store: Arc<ScanStore>,
        storage: Arc<ScanStorage>,
        delay: Duration,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            storage,
            delay,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Accept a submission: persist the images, insert the pending record,
    /// and spawn the completion task.
    ///
    /// Returns the new scan id as soon as the input files are durably
    /// written; processing latency never shows up in the response. On a
    /// storage failure the whole submission is aborted — no record is
    /// inserted and no task is spawned.
    pub async fn submit(&self, name: String, images: Vec<Bytes>) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        self.storage.store_images(&id, &images).await?;

        // Pending record goes in before the spawn so the completion task
        // always finds an entry to transition.
        self.store.insert_pending(&id, &name);

        let store = Arc::clone(&self.store);
        let storage = Arc::clone(&self.storage);
        let delay = self.delay;
        let artifact_url = self.artifact_url(&id);
        let task_id = id.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::process(&store, &storage, delay, &task_id, artifact_url).await {
                tracing::error!(scan_id = %task_id, error = %e, "scan processing failed");
                store.mark_failed(&task_id, e.to_string());
            }
        });

        tracing::info!(scan_id = %id, image_count = images.len(), "scan accepted");
        Ok(id)
    }

    /// Background completion body: simulated processing delay, artifact
    /// write, then the single terminal store write.
    async fn process(
        store: &ScanStore,
        storage: &ScanStorage,
        delay: Duration,
        id: &str,
        artifact_url: String,
    ) -> Result<(), StorageError> {
        tokio::time::sleep(delay).await;
        storage.write_artifact(id, PLACEHOLDER_ARTIFACT).await?;
        store.mark_finished(id, artifact_url, Utc::now());
        tracing::info!(scan_id = %id, "scan finished");
        Ok(())
    }

    /// Absolute retrieval URL for a scan's artifact.
    pub fn artifact_url(&self, id: &str) -> String {
        format!("{}/uploads/{id}/{ARTIFACT_FILE}", self.public_url)
    }
}
