//! Sponsor settings handlers

use axum::{extract::State, Json};
use doi_service::dto::{SponsorResponse, UpsertSponsorRequest};
use doi_service::SponsorService;

use crate::extractors::{AuthContext, AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /sponsor
pub async fn get_sponsor(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<SponsorResponse>> {
    let response = SponsorService::new(state.service_context())
        .get_sponsor()
        .await?;
    Ok(Json(response))
}

/// PUT /sponsor (admin)
pub async fn upsert_sponsor(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    ValidatedJson(request): ValidatedJson<UpsertSponsorRequest>,
) -> ApiResult<Json<SponsorResponse>> {
    let response = SponsorService::new(state.service_context())
        .upsert_sponsor(&ctx, request)
        .await?;
    Ok(Json(response))
}
