//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quizroom_core::error::AppError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `AppError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),
            AppError::InvalidOperation(_) => (StatusCode::CONFLICT, "invalid_operation"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::ExternalService(_) => (StatusCode::BAD_GATEWAY, "external_service_error"),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::not_found("no such room")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(AppError::validation("bad input")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(
            status_of(AppError::unauthorized("wrong password")),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        assert_eq!(
            status_of(AppError::forbidden("not the owner")),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_conflict_kinds_map_to_409() {
        assert_eq!(
            status_of(AppError::already_exists("duplicate")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::invalid_operation("archived")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_infrastructure_kinds_map_to_5xx() {
        assert_eq!(
            status_of(AppError::internal("bug")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::external_service("downstream")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::service_unavailable("overloaded")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
