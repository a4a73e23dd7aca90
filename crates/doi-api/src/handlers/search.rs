//! Unified search handlers

use axum::{extract::State, Json};
use doi_service::dto::{GlobalSearchQuery, GlobalSearchResponse, SearchSuggestion, SuggestionQuery};
use doi_service::SearchService;

use crate::extractors::{ApiQuery, AuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /search?q=&scope=&page=&per_page=
pub async fn search_all(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<GlobalSearchQuery>,
) -> ApiResult<Json<GlobalSearchResponse>> {
    let response = SearchService::new(state.service_context())
        .search_all(query)
        .await?;
    Ok(Json(response))
}

/// GET /search/suggestions?q=&limit=
pub async fn search_suggestions(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<SuggestionQuery>,
) -> ApiResult<Json<Vec<SearchSuggestion>>> {
    let response = SearchService::new(state.service_context())
        .search_suggestions(&query.q, query.limit)
        .await?;
    Ok(Json(response))
}
