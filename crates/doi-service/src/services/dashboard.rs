//! Dashboard service
//!
//! Aggregates the landing-page overview.

use tracing::instrument;

use crate::dto::{
    article_status_counts, DashboardResponse, DashboardSummary, MemberStatsResponse,
    PublicationCountsResponse,
};

use super::activity::{ActivityService, DEFAULT_RECENT_LIMIT};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Member, publication and article counts with the latest activity
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ServiceResult<DashboardResponse> {
        let members = MemberStatsResponse::from(self.ctx.member_repo().stats().await?);
        let publications =
            PublicationCountsResponse::from(self.ctx.publication_repo().stats(None).await?);
        let articles = article_status_counts(self.ctx.article_repo().count_by_status().await?);
        let recent_activities = ActivityService::new(self.ctx)
            .get_recent_activities(Some(DEFAULT_RECENT_LIMIT), None, None)
            .await?;

        let summary = DashboardSummary {
            total_entities: members.total + publications.total,
            active_entities: members.active + publications.active,
        };

        Ok(DashboardResponse {
            members,
            publications,
            articles,
            recent_activities,
            summary,
        })
    }
}
