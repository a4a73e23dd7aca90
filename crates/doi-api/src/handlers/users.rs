//! User administration handlers (admin only)

use axum::{extract::State, Json};
use doi_service::dto::{
    CreateUserRequest, PaginatedResponse, UpdateUserRequest, UserListQuery, UserResponse,
};
use doi_service::UserService;

use crate::extractors::{ApiQuery, AuthContext, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let response = UserService::new(state.service_context())
        .list_users(&ctx, query)
        .await?;
    Ok(Json(response))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(user_id): IdPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let response = UserService::new(state.service_context())
        .get_user(&ctx, user_id)
        .await?;
    Ok(Json(response))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let response = UserService::new(state.service_context())
        .create_user(&ctx, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(user_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let response = UserService::new(state.service_context())
        .update_user(&ctx, user_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(user_id): IdPath<i64>,
) -> ApiResult<NoContent> {
    UserService::new(state.service_context())
        .delete_user(&ctx, user_id)
        .await?;
    Ok(NoContent)
}
