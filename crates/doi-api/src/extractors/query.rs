//! Query string extractor
//!
//! Wraps `axum::extract::Query` so malformed parameters (bad dates, unknown
//! enum values, non-numeric pages) produce the standard error body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Typed query parameters; page and per_page clamping happens in the services
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;
        Ok(ApiQuery(params))
    }
}
