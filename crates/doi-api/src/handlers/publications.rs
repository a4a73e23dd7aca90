//! Publication handlers

use axum::{extract::State, Json};
use doi_service::dto::{
    PublicationResponse, PublicationSearchResult, SearchQuery, UpdatePublicationRequest,
};
use doi_service::PublicationService;

use crate::extractors::{ApiQuery, AuthContext, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /publications/search?q=&type=
pub async fn search_publications(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<PublicationSearchResult>>> {
    let response = PublicationService::new(state.service_context())
        .search_publications(&query.q, query.publication_type, query.limit)
        .await?;
    Ok(Json(response))
}

/// GET /publications/{id}
pub async fn get_publication(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(publication_id): IdPath<i64>,
) -> ApiResult<Json<PublicationResponse>> {
    let response = PublicationService::new(state.service_context())
        .get_publication(publication_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /publications/{id}
pub async fn update_publication(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(publication_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdatePublicationRequest>,
) -> ApiResult<Json<PublicationResponse>> {
    let response = PublicationService::new(state.service_context())
        .update_publication(&ctx, publication_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /publications/{id}
pub async fn delete_publication(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(publication_id): IdPath<i64>,
) -> ApiResult<NoContent> {
    PublicationService::new(state.service_context())
        .delete_publication(&ctx, publication_id)
        .await?;
    Ok(NoContent)
}

/// POST /publications/{id}/toggle-status
pub async fn toggle_publication_status(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(publication_id): IdPath<i64>,
) -> ApiResult<Json<PublicationResponse>> {
    let response = PublicationService::new(state.service_context())
        .toggle_publication_status(&ctx, publication_id)
        .await?;
    Ok(Json(response))
}
