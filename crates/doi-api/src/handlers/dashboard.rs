//! Dashboard handler

use axum::{extract::State, Json};
use doi_service::dto::DashboardResponse;
use doi_service::DashboardService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let response = DashboardService::new(state.service_context())
        .dashboard()
        .await?;
    Ok(Json(response))
}
