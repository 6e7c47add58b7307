// crates/server/src/routes/scans.rs
//! Scan submission and status endpoints.
//!
//! - POST /scans — multipart upload, returns the new scan id
//! - GET /scans/{id} — poll a scan's processing status

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::scans::{ScanRecord, ScanState};
use crate::state::AppState;

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct CreateScanResponse {
    pub id: String,
}

/// Status response for a scan.
///
/// Finished scans echo the full record. Everything else is the minimal
/// `{"status": …}` shape with no id/name echo — including ids that were
/// never submitted, which stay indistinguishable from scans in flight.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanStatusResponse {
    Finished {
        id: String,
        name: String,
        #[serde(rename = "artifactURL")]
        artifact_url: String,
        #[serde(rename = "processedAt")]
        processed_at: String,
        status: &'static str,
    },
    Minimal {
        status: &'static str,
    },
}

impl ScanStatusResponse {
    const PROCESSING: Self = ScanStatusResponse::Minimal {
        status: "processing",
    };

    fn from_record(record: ScanRecord) -> Self {
        match record.state {
            ScanState::Finished {
                artifact_url,
                processed_at,
            } => ScanStatusResponse::Finished {
                id: record.id,
                name: record.name,
                artifact_url,
                // UTC, explicit Z suffix.
                processed_at: processed_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                status: "finished",
            },
            ScanState::Pending => Self::PROCESSING,
            ScanState::Failed { .. } => ScanStatusResponse::Minimal { status: "failed" },
        }
    }
}

/// POST /scans — accept a named batch of images and start processing.
///
/// Files are stored by 1-based field order; original filenames are ignored,
/// so clients must send parts in the intended order.
async fn create_scan(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<CreateScanResponse>> {
    let mut name: Option<String> = None;
    let mut images: Vec<Bytes> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        // Copy the field name out; consuming the body invalidates it.
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(field.text().await?),
            // The iOS client posts image parts under `files[]`.
            "files" | "files[]" => images.push(field.bytes().await?),
            _ => {}
        }
    }

    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::BadRequest("Missing or empty 'name' field".into())),
    };
    if images.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one 'files' part is required".into(),
        ));
    }

    let id = state.processor.submit(name, images).await?;
    Ok(Json(CreateScanResponse { id }))
}

/// GET /scans/{id} — current status. Never an error: unknown ids report the
/// same minimal processing shape as scans still in flight.
async fn scan_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ScanStatusResponse> {
    let response = state
        .store
        .get(&id)
        .map(ScanStatusResponse::from_record)
        .unwrap_or(ScanStatusResponse::PROCESSING);
    Json(response)
}

/// Build the scans router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/scans", post(create_scan))
        .route("/scans/{id}", get(scan_detail))
}
