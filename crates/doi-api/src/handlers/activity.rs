//! Activity log handlers
//!
//! Read-only views over the audit trail, CSV export and the admin cleanup.

use axum::{extract::State, Json};
use doi_service::dto::{
    ActivityListQuery, ActivityResponse, ActivityStatistics, ActivityStatisticsQuery,
    ActivityStatsResponse, CleanupRequest, CleanupResponse, ExportRequest, PaginatedResponse,
    RecentActivityQuery,
};
use doi_core::EntityType;
use doi_service::ActivityService;
use serde::Deserialize;

use crate::extractors::{ApiQuery, AuthContext, AuthUser, EntityPath, IdPath, OptionalJson};
use crate::response::{ApiResult, CsvDownload};
use crate::state::AppState;

/// Optional `limit` for entity timelines
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// GET /activity
pub async fn list_activities(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<ActivityListQuery>,
) -> ApiResult<Json<PaginatedResponse<ActivityResponse>>> {
    let response = ActivityService::new(state.service_context())
        .list_activities(query)
        .await?;
    Ok(Json(response))
}

/// GET /activity/recent
pub async fn recent_activities(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<RecentActivityQuery>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let response = ActivityService::new(state.service_context())
        .get_recent_activities(query.limit, query.user_id, query.sponsor_id)
        .await?;
    Ok(Json(response))
}

/// GET /activity/entity/{type}/{id}
///
/// Unknown entity types are rejected here with 400; the service itself
/// answers them with an empty list.
pub async fn entity_activities(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<EntityPath>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let entity_type: EntityType = path.entity_type.parse()?;
    let response = ActivityService::new(state.service_context())
        .get_activities_for_entity(entity_type.as_str(), path.entity_id, query.limit)
        .await?;
    Ok(Json(response))
}

/// GET /activity/stats
pub async fn activity_statistics(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<ActivityStatisticsQuery>,
) -> ApiResult<Json<ActivityStatistics>> {
    let response = ActivityService::new(state.service_context())
        .get_activity_statistics(query.user_id, query.sponsor_id, query.days)
        .await?;
    Ok(Json(response))
}

/// GET /activity/stats/periods
pub async fn activity_period_counts(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<ActivityStatsResponse>> {
    let response = ActivityService::new(state.service_context())
        .activity_stats()
        .await?;
    Ok(Json(response))
}

/// POST /activity/export; an empty body exports everything
pub async fn export_activities(
    State(state): State<AppState>,
    _auth: AuthUser,
    OptionalJson(body): OptionalJson<ExportRequest>,
) -> ApiResult<CsvDownload> {
    let request = body.unwrap_or_default();
    let export = ActivityService::new(state.service_context())
        .export_csv(request)
        .await?;
    tracing::info!(rows = export.row_count, filename = %export.filename, "Activity log exported");
    Ok(CsvDownload(export))
}

/// POST /activity/cleanup (admin); without a body the configured retention applies
pub async fn cleanup_activities(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    OptionalJson(body): OptionalJson<CleanupRequest>,
) -> ApiResult<Json<CleanupResponse>> {
    let retention_days = body.and_then(|request| request.retention_days);
    let response = ActivityService::new(state.service_context())
        .cleanup(&ctx, retention_days)
        .await?;
    Ok(Json(response))
}
