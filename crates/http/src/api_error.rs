//! Typed API error for HTTP handlers.
//!
//! Converts service errors into JSON responses with the matching status code.
//! Handlers return `Result<Json<T>, ApiError>` so no failure collapses into a
//! bare 500.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prepdesk_core::CoreError;
use prepdesk_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Serialized as `{"error": "message"}`. `Internal` logs the real error
/// server-side and returns a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400: caller input is missing or malformed.
    BadRequest(String),
    /// 404: the referenced prospect, rep or meeting does not exist.
    NotFound(String),
    /// 409: a uniqueness rule rejected the write.
    Conflict(String),
    /// 502: the text-generation provider failed.
    BadGateway(String),
    /// 503: the store is unreachable or an optional backend is not configured.
    ServiceUnavailable(String),
    /// 500: unexpected failure. Details logged, not exposed.
    Internal(ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::BadRequest(msg),
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Conflict(msg) => Self::Conflict(msg),
            ServiceError::GenerationFailure(msg) => {
                tracing::warn!(error = %msg, "text generation failed");
                Self::BadGateway("game plan or recommendation generation failed".to_owned())
            },
            ServiceError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "store unavailable");
                Self::ServiceUnavailable("store unavailable, try again later".to_owned())
            },
            ServiceError::NotConfigured(msg) => Self::ServiceUnavailable(msg),
            ServiceError::Storage(_) => Self::Internal(err),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use prepdesk_storage::StorageError;

    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn service_errors_keep_distinct_statuses() {
        assert_eq!(status_of(ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ServiceError::not_found("meeting", 9)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::Conflict("email".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_of(ServiceError::GenerationFailure("boom".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ServiceError::StoreUnavailable("pool timed out".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ServiceError::Storage(StorageError::Migration("bad".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn core_errors_are_bad_requests() {
        let err = ApiError::from(CoreError::MissingField("email"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
