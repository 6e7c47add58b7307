// crates/server/src/routes/uploads.rs
//! Artifact download endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Content type for USDZ scene files.
const USDZ_CONTENT_TYPE: &str = "model/vnd.usdz+zip";

/// GET /uploads/{id}/model.usdz — download a finished scan's artifact.
///
/// Existence is checked against the filesystem, not the scan table, so this
/// can 404 for a scan the status endpoint still reports as processing.
async fn fetch_artifact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let path = state.storage.artifact_path(&id);
    let contents = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::ArtifactNotFound(id))?;

    Ok(([(header::CONTENT_TYPE, USDZ_CONTENT_TYPE)], contents).into_response())
}

/// Build the uploads router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/uploads/{id}/model.usdz", get(fetch_artifact))
}
