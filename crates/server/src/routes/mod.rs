//! API route handlers for the scanhub server.

pub mod health;
pub mod scans;
pub mod uploads;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined router.
///
/// Paths are unprefixed; the mobile client hardcodes them.
///
/// Routes:
/// - POST /scans - Submit a named batch of images, returns the scan id
/// - GET /scans/{id} - Poll a scan's processing status
/// - GET /uploads/{id}/model.usdz - Download the derived artifact
/// - GET /health - Health check
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(scans::router())
        .merge(uploads::router())
        .with_state(state)
}
