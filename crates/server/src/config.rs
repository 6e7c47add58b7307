// crates/server/src/config.rs
//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default port for the server.
const DEFAULT_PORT: u16 = 8000;

/// Default simulated processing time.
const DEFAULT_PROCESSING_DELAY_MS: u64 = 1000;

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP listener binds.
    pub port: u16,
    /// Root directory holding one subdirectory per scan.
    pub upload_root: PathBuf,
    /// Base URL embedded in artifact retrieval links (no trailing slash).
    pub public_url: String,
    /// Simulated processing time before a scan finishes.
    pub processing_delay: Duration,
}

impl Config {
    /// Build configuration from the environment, falling back to defaults.
    ///
    /// Priority per knob:
    /// - `SCANHUB_PORT`, then `PORT`, then 8000
    /// - `SCANHUB_UPLOAD_DIR`, then `./uploads`
    /// - `SCANHUB_PUBLIC_URL`, then `http://localhost:{port}`
    /// - `SCANHUB_PROCESSING_DELAY_MS`, then 1000
    pub fn from_env() -> Self {
        let port = std::env::var("SCANHUB_PORT")
            .ok()
            .or_else(|| std::env::var("PORT").ok())
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let upload_root = std::env::var("SCANHUB_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let public_url = std::env::var("SCANHUB_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let processing_delay = std::env::var("SCANHUB_PROCESSING_DELAY_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS));

        Self {
            port,
            upload_root,
            public_url: public_url.trim_end_matches('/').to_string(),
            processing_delay,
        }
    }
}
