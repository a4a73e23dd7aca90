//! Authentication handlers
//!
//! Endpoints for login, logout, token refresh and the caller's own profile.

use axum::{extract::State, Json};
use doi_service::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RefreshTokenRequest,
    UpdateProfileRequest, UserResponse,
};
use doi_service::AuthService;

use crate::extractors::{ApiJson, AuthContext, ClientContext, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientContext(ctx): ClientContext,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(&ctx, request).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout; tokens are stateless, so this only records the event
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context()).logout(&ctx).await?;
    Ok(NoContent)
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
) -> ApiResult<Json<UserResponse>> {
    let response = AuthService::new(state.service_context())
        .current_user(&ctx)
        .await?;
    Ok(Json(response))
}

/// PATCH /auth/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let response = AuthService::new(state.service_context())
        .update_profile(&ctx, request)
        .await?;
    Ok(Json(response))
}

/// POST /auth/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::new(state.service_context())
        .change_password(&ctx, request)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}
