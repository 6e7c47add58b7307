// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Artifact not found for scan: {0}")]
    ArtifactNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::ArtifactNotFound(id) => {
                tracing::warn!(scan_id = %id, "Artifact not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Artifact not found", format!("Scan ID: {}", id)),
                )
            }
            ApiError::Storage(storage_err) => {
                let error_msg = match storage_err {
                    StorageError::CreateDir { path, .. } => {
                        tracing::error!(path = %path.display(), "Failed to create scan directory");
                        "Failed to create scan directory"
                    }
                    StorageError::Write { path, .. } => {
                        tracing::error!(path = %path.display(), "Failed to write upload");
                        "Failed to write upload"
                    }
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(error_msg, storage_err.to_string()),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Bad request", msg.clone()),
                )
            }
            ApiError::Multipart(err) => {
                tracing::warn!(error = %err, "Malformed multipart body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Malformed multipart body", err.to_string()),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::path::PathBuf;

    /// Helper to extract status code and body from a response
    async fn extract_response(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        (status, error_response)
    }

    #[tokio::test]
    async fn test_artifact_not_found_returns_404() {
        let error = ApiError::ArtifactNotFound("abc123".to_string());
        let response = error.into_response();
        let (status, body) = extract_response(response).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Artifact not found");
        assert!(body.details.unwrap().contains("abc123"));
    }

    #[tokio::test]
    async fn test_storage_create_dir_returns_500() {
        let error = ApiError::Storage(StorageError::CreateDir {
            path: PathBuf::from("/uploads/abc"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk error"),
        });
        let response = error.into_response();
        let (status, body) = extract_response(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to create scan directory");
        assert!(body.details.unwrap().contains("/uploads/abc"));
    }

    #[tokio::test]
    async fn test_storage_write_returns_500() {
        let error = ApiError::Storage(StorageError::Write {
            path: PathBuf::from("/uploads/abc/1.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        });
        let response = error.into_response();
        let (status, body) = extract_response(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to write upload");
    }

    #[tokio::test]
    async fn test_bad_request_returns_400() {
        let error = ApiError::BadRequest("Missing 'name' field".to_string());
        let response = error.into_response();
        let (status, body) = extract_response(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Bad request");
        assert!(body.details.unwrap().contains("name"));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new("Test error");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error\":\"Test error\""));
        assert!(!json.contains("details")); // None should be skipped

        let response = ErrorResponse::with_details("Test error", "More info");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error\":\"Test error\""));
        assert!(json.contains("\"details\":\"More info\""));
    }

    #[test]
    fn test_api_error_from_storage_error() {
        let storage_err = StorageError::Write {
            path: PathBuf::from("/test"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        };
        let api_err: ApiError = storage_err.into();
        assert!(matches!(api_err, ApiError::Storage(_)));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::ArtifactNotFound("test-id".to_string());
        assert_eq!(err.to_string(), "Artifact not found for scan: test-id");

        let err = ApiError::BadRequest("oops".to_string());
        assert_eq!(err.to_string(), "Bad request: oops");
    }
}
