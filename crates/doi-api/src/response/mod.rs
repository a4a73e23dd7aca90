//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON/CSV response formatting.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use doi_common::{AppError, ErrorResponse};
use doi_core::DomainError;
use doi_service::dto::CsvExport;
use doi_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => e.status_code(),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => 400,
            Self::MissingAuth | Self::InvalidAuthFormat => 401,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();
        let message = self.to_string();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let details = if let Self::Validation(errors) = &self {
            Some(serde_json::to_value(errors).unwrap_or_default())
        } else {
            None
        };

        let body = ErrorBody {
            error: ErrorResponse {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// CSV download with an attachment filename
pub struct CsvDownload(pub CsvExport);

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        let CsvExport {
            filename, content, ..
        } = self.0;
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

        (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/csv; charset=utf-8"),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            content,
        )
            .into_response()
    }
}
