//! Errors raised outside the registration domain
//!
//! Sign-in and bearer tokens, startup configuration and storage failures land
//! here. Domain rule violations are wrapped untouched so the status and code
//! they carry reach the response unchanged.

use doi_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Which side a failure is blamed on when it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blame {
    Caller,
    Server,
}

/// HTTP status plus the machine-readable code clients branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: u16,
    pub code: &'static str,
}

impl Classification {
    #[must_use]
    pub const fn new(status: u16, code: &'static str) -> Self {
        Self { status, code }
    }

    #[must_use]
    pub fn blame(self) -> Blame {
        if self.status >= 500 {
            Blame::Server
        } else {
            Blame::Caller
        }
    }
}

const UNAUTHENTICATED: u16 = 401;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Email and password did not match an account that may sign in.
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Bearer token is malformed or was not issued here")]
    InvalidToken,

    #[error("Bearer token has expired")]
    TokenExpired,

    /// The operation needs an operator but the request carries none.
    #[error("No authenticated operator on this request")]
    MissingAuth,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Database(String),

    /// Details go to the log only; clients see the generic text.
    #[error("Unexpected server failure")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub fn classify(&self) -> Classification {
        match self {
            Self::InvalidCredentials => Classification::new(UNAUTHENTICATED, "INVALID_CREDENTIALS"),
            Self::InvalidToken => Classification::new(UNAUTHENTICATED, "INVALID_TOKEN"),
            Self::TokenExpired => Classification::new(UNAUTHENTICATED, "TOKEN_EXPIRED"),
            Self::MissingAuth => Classification::new(UNAUTHENTICATED, "MISSING_AUTH"),
            Self::Validation(_) => Classification::new(400, "VALIDATION_ERROR"),
            Self::NotFound(_) => Classification::new(404, "NOT_FOUND"),
            Self::Database(_) => Classification::new(500, "DATABASE_ERROR"),
            Self::Internal(_) => Classification::new(500, "INTERNAL_ERROR"),
            Self::Config(_) => Classification::new(500, "CONFIG_ERROR"),
            Self::Domain(e) => Classification::new(e.status_code(), e.code()),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.classify().status
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.classify().code
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.classify().blame() == Blame::Caller
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.classify().blame() == Blame::Server
    }

    #[must_use]
    pub fn not_found(what: impl fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    #[must_use]
    pub fn validation(reason: impl fmt::Display) -> Self {
        Self::Validation(reason.to_string())
    }

    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal(cause.into())
    }
}

/// The `error` object of every failed API response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Per-field validation failures, when there are any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let Classification { code, .. } = err.classify();
        Self {
            code: code.to_owned(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        (&err).into()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_share_unauthenticated_status() {
        let cases = [
            (AppError::InvalidCredentials, "INVALID_CREDENTIALS"),
            (AppError::InvalidToken, "INVALID_TOKEN"),
            (AppError::TokenExpired, "TOKEN_EXPIRED"),
            (AppError::MissingAuth, "MISSING_AUTH"),
        ];
        for (err, code) in cases {
            assert_eq!(err.classify(), Classification::new(401, code));
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_infrastructure_failures_blame_server() {
        let cases = [
            AppError::Database("pool timed out".into()),
            AppError::Config("DATABASE_URL is empty".into()),
            AppError::internal(anyhow::anyhow!("disk full")),
        ];
        for err in cases {
            assert_eq!(err.status_code(), 500);
            assert!(err.is_server_error());
            assert!(!err.is_client_error());
        }
    }

    #[test]
    fn test_internal_hides_cause_from_message() {
        let err = AppError::internal(anyhow::anyhow!("connection string with password"));
        assert_eq!(err.to_string(), "Unexpected server failure");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_domain_error_passes_through() {
        let err = AppError::from(DomainError::ArticleNotInReview);
        assert_eq!(err.classify(), Classification::new(409, "INVALID_STATUS_TRANSITION"));

        let err = AppError::from(DomainError::MemberNotFound(9));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Member not found: 9");

        let err = AppError::from(DomainError::AdminRequired);
        assert_eq!(err.classify().blame(), Blame::Caller);
    }

    #[test]
    fn test_error_response_from_not_found() {
        let response = ErrorResponse::from(AppError::not_found("Publication 12"));
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Publication 12 does not exist");
        assert!(response.details.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_validation_message() {
        let err = AppError::validation("retention must be at least 30 days");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid input: retention must be at least 30 days");
    }
}
