//! Validated JSON extractor
//!
//! Extracts and validates JSON request bodies using the validator crate.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Validated JSON extractor
///
/// Extracts a JSON body and validates it using the `validator` crate.
/// The inner type must implement both `Deserialize` and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body without field-level validation (transition bodies, exports)
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(ApiJson(value))
    }
}

/// JSON body that may be left out entirely.
///
/// An empty (or whitespace-only) body yields `None`. Anything else must be
/// JSON that deserializes into `T`; a body that does not is rejected with
/// 400 instead of being treated as absent.
#[derive(Debug, Clone)]
pub struct OptionalJson<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }
        if !is_json {
            return Err(ApiError::invalid_body(
                "Expected request with `Content-Type: application/json`",
            ));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(json_rejection)?;
        Ok(OptionalJson(Some(value)))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
        _ => ApiError::invalid_body("Invalid JSON body"),
    }
}
