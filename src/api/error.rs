//! API error types with structured JSON responses.
//!
//! Each failure kind gets its own status and code so the form vendor's
//! retry logic can tell a bad payload from an unavailable database.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::db::DatabaseError;
use crate::intake::IntakeError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown reference value: {0}")]
    UnknownReference(String),
    #[error("Bad payload: {0}")]
    BadPayload(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::UnknownReference(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNKNOWN_REFERENCE", detail)
            }
            ApiError::BadPayload(detail) => (StatusCode::BAD_REQUEST, "BAD_PAYLOAD", detail),
            ApiError::StorageUnavailable(detail) => {
                tracing::error!(detail, "Storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    "Storage is unavailable, retry later".to_string(),
                )
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::UnknownReference { .. } => ApiError::UnknownReference(err.to_string()),
            IntakeError::Storage(e) => ApiError::from(e),
            other => ApiError::BadPayload(other.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DatabaseError::UnknownReference { .. } => ApiError::UnknownReference(err.to_string()),
            DatabaseError::Sqlite(_)
            | DatabaseError::Io(_)
            | DatabaseError::MigrationFailed { .. } => {
                ApiError::StorageUnavailable(err.to_string())
            }
            DatabaseError::InvalidEnum { .. } | DatabaseError::ConstraintViolation(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Database(e) => ApiError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::models::enums::LookupTable;

    async fn json_of(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn unknown_reference_returns_422() {
        let err: ApiError = IntakeError::UnknownReference {
            table: LookupTable::Country,
            value: "Atlantis".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "UNKNOWN_REFERENCE");
        assert_eq!(json["error"]["message"], "No countries entry named 'Atlantis'");
    }

    #[tokio::test]
    async fn malformed_input_returns_400() {
        let err: ApiError = IntakeError::MissingField("q90_dateOf90".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "BAD_PAYLOAD");
    }

    #[tokio::test]
    async fn storage_failure_returns_503_without_detail() {
        let err: ApiError = IntakeError::Storage(DatabaseError::Sqlite(
            rusqlite::Error::InvalidQuery,
        ))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "STORAGE_UNAVAILABLE");
        assert_eq!(json["error"]["message"], "Storage is unavailable, retry later");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Patient 9 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_of(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn storage_io_failure_returns_503() {
        let err: ApiError = CoreError::Database(DatabaseError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn database_not_found_maps_to_not_found() {
        let err: ApiError = DatabaseError::NotFound {
            entity_type: "patients".into(),
            id: "3".into(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
