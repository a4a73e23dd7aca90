//! Member handlers
//!
//! Endpoints for member organisations and the publications they own.

use axum::{extract::State, Json};
use doi_service::dto::{
    CreateMemberRequest, CreatePublicationRequest, MemberListQuery, MemberResponse,
    MemberSearchResult, MemberStatsResponse, PaginatedResponse, PublicationCountsResponse,
    PublicationListQuery, PublicationResponse, SearchQuery, UpdateMemberRequest,
};
use doi_service::{MemberService, PublicationService};

use crate::extractors::{ApiQuery, AuthContext, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<MemberListQuery>,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    let response = MemberService::new(state.service_context())
        .list_members(query)
        .await?;
    Ok(Json(response))
}

/// GET /members/search?q=
pub async fn search_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<MemberSearchResult>>> {
    let response = MemberService::new(state.service_context())
        .search_members(&query.q, query.limit)
        .await?;
    Ok(Json(response))
}

/// GET /members/stats
pub async fn member_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<MemberStatsResponse>> {
    let response = MemberService::new(state.service_context())
        .member_statistics()
        .await?;
    Ok(Json(response))
}

/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(member_id): IdPath<i64>,
) -> ApiResult<Json<MemberResponse>> {
    let response = MemberService::new(state.service_context())
        .get_member(member_id)
        .await?;
    Ok(Json(response))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let response = MemberService::new(state.service_context())
        .create_member(&ctx, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PATCH /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(member_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let response = MemberService::new(state.service_context())
        .update_member(&ctx, member_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(member_id): IdPath<i64>,
) -> ApiResult<NoContent> {
    MemberService::new(state.service_context())
        .delete_member(&ctx, member_id)
        .await?;
    Ok(NoContent)
}

/// POST /members/{id}/toggle-status
pub async fn toggle_member_status(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(member_id): IdPath<i64>,
) -> ApiResult<Json<MemberResponse>> {
    let response = MemberService::new(state.service_context())
        .toggle_member_status(&ctx, member_id)
        .await?;
    Ok(Json(response))
}

/// GET /members/{id}/publications
pub async fn list_member_publications(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(member_id): IdPath<i64>,
    ApiQuery(query): ApiQuery<PublicationListQuery>,
) -> ApiResult<Json<PaginatedResponse<PublicationResponse>>> {
    let response = PublicationService::new(state.service_context())
        .list_publications_for_member(member_id, query)
        .await?;
    Ok(Json(response))
}

/// POST /members/{id}/publications
pub async fn create_member_publication(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(member_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<CreatePublicationRequest>,
) -> ApiResult<Created<Json<PublicationResponse>>> {
    let response = PublicationService::new(state.service_context())
        .create_publication(&ctx, member_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /members/{id}/publications/counts
pub async fn member_publication_counts(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(member_id): IdPath<i64>,
) -> ApiResult<Json<PublicationCountsResponse>> {
    let response = PublicationService::new(state.service_context())
        .publication_counts_by_type(member_id)
        .await?;
    Ok(Json(response))
}
