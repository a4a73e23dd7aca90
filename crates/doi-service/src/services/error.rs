//! Failures a service operation can report
//!
//! Domain and application errors are carried as-is. The remaining variants
//! cover lookups by id and input checks that only make sense at the service
//! boundary, such as retention windows and search limits.

use doi_common::{AppError, Classification};
use doi_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    /// Lookup of a record that is not a domain aggregate, such as a user.
    #[error("{resource} {id} does not exist")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unexpected service failure: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    /// Wrapped errors keep their own classification.
    pub fn classify(&self) -> Classification {
        match self {
            Self::Domain(e) => Classification::new(e.status_code(), e.code()),
            Self::App(e) => e.classify(),
            Self::NotFound { .. } => Classification::new(404, "NOT_FOUND"),
            Self::Validation(_) => Classification::new(400, "VALIDATION_ERROR"),
            Self::Internal(_) => Classification::new(500, "INTERNAL_ERROR"),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.classify().status
    }

    pub fn error_code(&self) -> &'static str {
        self.classify().code
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => e.into(),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => Self::not_found(format_args!("{resource} {id}")),
            ServiceError::Validation(reason) => Self::Validation(reason),
            ServiceError::Internal(reason) => Self::internal(anyhow::Error::msg(reason)),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
