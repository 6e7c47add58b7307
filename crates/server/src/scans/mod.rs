// crates/server/src/scans/mod.rs
//! Scan lifecycle: records, the in-memory store, and background processing.
//!
//! Provides:
//! - `ScanStore` — process-wide table from scan id to record
//! - `ScanProcessor` — submission and background completion
//! - `ScanRecord`/`ScanState` — the explicit per-scan state machine

pub mod processor;
pub mod record;
pub mod store;

pub use processor::ScanProcessor;
pub use record::{ScanRecord, ScanState};
pub use store::ScanStore;
