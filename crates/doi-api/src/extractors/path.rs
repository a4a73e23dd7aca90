//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Numeric (or tuple) path parameters with a 400 on malformed ids
#[derive(Debug, Clone)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(IdPath(inner))
    }
}

/// `/activity/entity/:entity_type/:entity_id`
#[derive(Debug, serde::Deserialize)]
pub struct EntityPath {
    pub entity_type: String,
    pub entity_id: i64,
}
