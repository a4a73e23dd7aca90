//! Article handlers
//!
//! Drafting endpoints plus the editorial transitions. Transition handlers
//! return the article in its new state.

use axum::{extract::State, Json};
use doi_service::dto::{
    AffiliationResponse, ArticleResponse, AuthorResponse, CreateAffiliationRequest,
    CreateArticleRequest, CreateAuthorRequest, ReturnArticleRequest, SetPdfStatusRequest,
    UpdateArticleRequest, WithdrawArticleRequest,
};
use doi_service::ArticleService;

use crate::extractors::{ApiJson, AuthContext, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /articles
pub async fn create_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<CreateArticleRequest>,
) -> ApiResult<Created<Json<ArticleResponse>>> {
    let response = ArticleService::new(state.service_context())
        .create_article(&ctx, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(article_id): IdPath<i64>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .get_article(article_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .update_article(&ctx, article_id, request)
        .await?;
    Ok(Json(response))
}

/// GET /articles/{id}/authors
pub async fn list_authors(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(article_id): IdPath<i64>,
) -> ApiResult<Json<Vec<AuthorResponse>>> {
    let response = ArticleService::new(state.service_context())
        .list_authors(article_id)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/authors
pub async fn add_author(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<CreateAuthorRequest>,
) -> ApiResult<Created<Json<AuthorResponse>>> {
    let response = ArticleService::new(state.service_context())
        .add_author(&ctx, article_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /articles/{id}/authors/{author_id}/affiliations
pub async fn list_affiliations(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath((article_id, author_id)): IdPath<(i64, i64)>,
) -> ApiResult<Json<Vec<AffiliationResponse>>> {
    let response = ArticleService::new(state.service_context())
        .list_affiliations(article_id, author_id)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/authors/{author_id}/affiliations
pub async fn add_affiliation(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath((article_id, author_id)): IdPath<(i64, i64)>,
    ValidatedJson(request): ValidatedJson<CreateAffiliationRequest>,
) -> ApiResult<Created<Json<AffiliationResponse>>> {
    let response = ArticleService::new(state.service_context())
        .add_affiliation(&ctx, article_id, author_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PUT /articles/{id}/pdf-status
pub async fn set_pdf_status(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
    ApiJson(request): ApiJson<SetPdfStatusRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .set_pdf_status(&ctx, article_id, request.pdf_status)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/submit
pub async fn submit_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .submit(&ctx, article_id)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/approve (admin)
pub async fn approve_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .approve(&ctx, article_id)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/return (admin)
pub async fn return_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
    ApiJson(request): ApiJson<ReturnArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .return_for_revision(&ctx, article_id, request.comment)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/publish (admin)
pub async fn publish_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .publish(&ctx, article_id)
        .await?;
    Ok(Json(response))
}

/// POST /articles/{id}/withdraw (admin)
pub async fn withdraw_article(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    IdPath(article_id): IdPath<i64>,
    ApiJson(request): ApiJson<WithdrawArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let response = ArticleService::new(state.service_context())
        .withdraw(&ctx, article_id, request.reason)
        .await?;
    Ok(Json(response))
}
