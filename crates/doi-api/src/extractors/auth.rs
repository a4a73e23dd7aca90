//! Authentication and request context extractors
//!
//! `AuthUser` validates the bearer token. `AuthContext` and `ClientContext`
//! build the explicit [`RequestContext`] handed to the services.

use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use doi_core::UserRole;
use doi_service::RequestContext;

use crate::response::ApiError;
use crate::state::AppState;

/// Header set by reverse proxies with the original client chain
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
/// Header set by nginx-style proxies with the original client address
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: i64,
    /// Role carried in the token
    pub role: UserRole,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthUser::new(user_id, claims.role))
    }
}

/// Request context of an authenticated caller
#[derive(Debug, Clone)]
pub struct AuthContext(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let ClientContext(context) = ClientContext::from_request_parts(parts, state).await?;
        Ok(AuthContext(context.with_user(auth.user_id, auth.role)))
    }
}

/// Request context without an authenticated user (login, refresh)
#[derive(Debug, Clone)]
pub struct ClientContext(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientContext(context_from_parts(parts)))
    }
}

/// Resolve the client address from proxy headers, then the socket
fn context_from_parts(parts: &Parts) -> RequestContext {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    };
    let remote_addr = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    RequestContext::from_sources(
        header(FORWARDED_FOR_HEADER),
        header(REAL_IP_HEADER),
        remote_addr,
    )
}
