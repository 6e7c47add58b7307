// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::scans::{ScanProcessor, ScanStore};
use crate::storage::ScanStorage;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Resolved server configuration.
    pub config: Config,
    /// Filesystem writer for uploads and artifacts.
    pub storage: Arc<ScanStorage>,
    /// The in-memory scan table — the only shared mutable state.
    pub store: Arc<ScanStore>,
    /// Lifecycle manager for submissions and background completion.
    pub processor: Arc<ScanProcessor>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(config: Config) -> Arc<Self> {
        let storage = Arc::new(ScanStorage::new(&config.upload_root));
        let store = Arc::new(ScanStore::new());
        let processor = Arc::new(ScanProcessor::new(
            Arc::clone(&store),
            Arc::clone(&storage),
            config.processing_delay,
            config.public_url.clone(),
        ));
        Arc::new(Self {
            start_time: Instant::now(),
            config,
            storage,
            store,
            processor,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
