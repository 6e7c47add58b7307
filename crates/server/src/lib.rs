// crates/server/src/lib.rs
//! Scanhub server library.
//!
//! Axum-based HTTP service that accepts photo-scan uploads, runs the
//! (simulated) reconstruction pipeline in a background task per scan, and
//! serves status polling and artifact downloads.

pub mod config;
pub mod error;
pub mod routes;
pub mod scans;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Upper bound on a submission body; scans are large batches of photos.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (submission, status, artifact download, health)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Config {
            port: 0,
            upload_root: dir.path().to_path_buf(),
            public_url: "http://localhost:8000".to_string(),
            processing_delay: Duration::from_millis(10),
        });
        (create_app(state), dir)
    }

    /// Helper to make a GET request to the app.
    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _dir) = test_app();
        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _dir) = test_app();
        let (status, _) = get(app, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_scan_reports_processing() {
        let (app, _dir) = test_app();
        let (status, body) = get(app, "/scans/never-submitted").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{\"status\":\"processing\"}");
    }
}
