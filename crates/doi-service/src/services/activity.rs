//! Activity service
//!
//! Read side of the activity log: filtered listings, per-entity history,
//! statistics, CSV export and the retention sweep.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use doi_core::traits::{ActivityQuery, IpFilter};
use doi_core::{action_prefix, ActivityRecord, EntityType, SYSTEM_CLEANUP};
use tracing::{info, instrument, warn};

use crate::dto::{
    ActivityListQuery, ActivityResponse, ActivityStatistics, ActivityStatsResponse,
    CleanupResponse, CsvExport, DateRange, ExportRequest, IpMatch, PageRequest, PaginatedResponse,
    MAX_PER_PAGE,
};

use super::activity_logger::{ActivityLogger, NewActivity};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::request_context::RequestContext;
use super::trimmed;

/// Default number of rows for the recent-activity feed
pub const DEFAULT_RECENT_LIMIT: i64 = 10;
/// Default number of rows in an entity's history
pub const DEFAULT_ENTITY_LIMIT: i64 = 50;
/// Default statistics window
pub const DEFAULT_STATISTICS_DAYS: i64 = 30;

const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Activity service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Filtered, paginated activity listing, newest first
    #[instrument(skip(self, query))]
    pub async fn list_activities(
        &self,
        query: ActivityListQuery,
    ) -> ServiceResult<PaginatedResponse<ActivityResponse>> {
        let page = PageRequest::new(query.page, query.per_page);
        let mut filter = list_filter(&query);
        filter.limit = page.per_page;
        filter.offset = page.offset();

        let repo = self.ctx.activity_repo();
        let total = repo.count(&filter).await?;
        let records = repo.find_many(&filter).await?;

        Ok(PaginatedResponse::new(records, page.page, page.per_page, total).map(Into::into))
    }

    /// Most recent activities, optionally for one user.
    ///
    /// `sponsor_id` is accepted but not applied: every activity belongs to
    /// the single sponsor.
    #[instrument(skip(self))]
    pub async fn get_recent_activities(
        &self,
        limit: Option<i64>,
        user_id: Option<i64>,
        sponsor_id: Option<i64>,
    ) -> ServiceResult<Vec<ActivityResponse>> {
        let query = ActivityQuery {
            user_id,
            limit: clamp_limit(limit, DEFAULT_RECENT_LIMIT),
            ..Default::default()
        };
        let records = self.ctx.activity_repo().find_many(&query).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// History of one member or publication. An unknown entity type yields
    /// an empty list.
    #[instrument(skip(self))]
    pub async fn get_activities_for_entity(
        &self,
        entity_type: &str,
        entity_id: i64,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<ActivityResponse>> {
        let Ok(entity_type) = entity_type.parse::<EntityType>() else {
            return Ok(Vec::new());
        };

        let mut query = ActivityQuery {
            limit: clamp_limit(limit, DEFAULT_ENTITY_LIMIT),
            ..Default::default()
        };
        match entity_type {
            EntityType::Member => query.member_id = Some(entity_id),
            EntityType::Publication => query.publication_id = Some(entity_id),
        }

        let records = self.ctx.activity_repo().find_many(&query).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Counts over the last `days` days, grouped by action prefix
    #[instrument(skip(self))]
    pub async fn get_activity_statistics(
        &self,
        user_id: Option<i64>,
        sponsor_id: Option<i64>,
        days: Option<i64>,
    ) -> ServiceResult<ActivityStatistics> {
        let days = days.unwrap_or(DEFAULT_STATISTICS_DAYS);
        if days < 1 {
            return Err(ServiceError::validation("days must be at least 1"));
        }
        let since = days_before(Utc::now(), days)?;

        let counts = self
            .ctx
            .activity_repo()
            .count_by_action(since, user_id)
            .await?;

        let mut action_breakdown = BTreeMap::new();
        let mut total_activities = 0;
        for count in counts {
            *action_breakdown
                .entry(action_prefix(&count.action).to_string())
                .or_insert(0) += count.count;
            total_activities += count.count;
        }

        Ok(ActivityStatistics {
            total_activities,
            action_breakdown,
            period_days: days,
        })
    }

    /// Statistics for the last day, week and month
    #[instrument(skip(self))]
    pub async fn activity_stats(&self) -> ServiceResult<ActivityStatsResponse> {
        Ok(ActivityStatsResponse {
            today: self.get_activity_statistics(None, None, Some(1)).await?,
            week: self.get_activity_statistics(None, None, Some(7)).await?,
            month: self.get_activity_statistics(None, None, Some(30)).await?,
        })
    }

    /// Render matching activities as CSV, newest first
    #[instrument(skip(self, request))]
    pub async fn export_csv(&self, request: ExportRequest) -> ServiceResult<CsvExport> {
        let now = Utc::now();
        let (created_from, created_before) = export_window(&request, now)?;
        let query = ActivityQuery {
            created_from,
            created_before,
            limit: self.ctx.activity_config().export_max_rows,
            ..Default::default()
        };

        let records = self.ctx.activity_repo().find_many(&query).await?;
        let content = render_csv(&records, request.include_ip, request.include_entity_refs);
        info!(rows = records.len(), "Activity log exported");

        Ok(CsvExport {
            filename: format!("activity_log_{}.csv", now.format("%Y%m%d_%H%M%S")),
            content,
            row_count: records.len(),
        })
    }

    /// Delete every activity older than `retention_days`, returning the count
    #[instrument(skip(self))]
    pub async fn cleanup_old_activities(&self, retention_days: i64) -> ServiceResult<u64> {
        let cutoff = days_before(Utc::now(), retention_days)?;
        let deleted = self.ctx.activity_repo().delete_older_than(cutoff).await?;
        info!(deleted, retention_days, "Old activity log entries removed");
        Ok(deleted)
    }

    /// Administrator-triggered retention sweep. The sweep itself is logged.
    #[instrument(skip(self, request))]
    pub async fn cleanup(
        &self,
        request: &RequestContext,
        retention_days: Option<i64>,
    ) -> ServiceResult<CleanupResponse> {
        let user_id = request.require_admin()?;

        let config = self.ctx.activity_config();
        let retention_days = retention_days.unwrap_or(config.retention_days);
        if retention_days < config.min_retention_days {
            warn!(retention_days, "Cleanup refused: retention below minimum");
            return Err(ServiceError::validation(format!(
                "Retention days must be at least {}",
                config.min_retention_days
            )));
        }

        let deleted_count = self.cleanup_old_activities(retention_days).await?;

        ActivityLogger::new(self.ctx)
            .log_activity(
                request,
                NewActivity::new(
                    user_id,
                    SYSTEM_CLEANUP,
                    format!(
                        "Manually cleaned up {deleted_count} activity log entries older than {retention_days} days"
                    ),
                ),
            )
            .await;

        Ok(CleanupResponse {
            deleted_count,
            retention_days,
        })
    }
}

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PER_PAGE)
}

/// `now` minus `days` whole days. Windows that leave chrono's range are a
/// caller error, not a panic.
fn days_before(now: DateTime<Utc>, days: i64) -> ServiceResult<DateTime<Utc>> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| {
            ServiceError::validation(format!("{days} days is outside the supported range"))
        })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    trimmed(value.clone())
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Exclusive bound covering the whole of `date`
fn end_of_day_exclusive(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date.checked_add_days(Days::new(1)).unwrap_or(date))
}

/// Repository filter for a listing query (limit/offset left at zero)
fn list_filter(query: &ActivityListQuery) -> ActivityQuery {
    ActivityQuery {
        created_from: query.start_date.map(start_of_day),
        created_before: query.end_date.map(end_of_day_exclusive),
        user_id: query.user_id,
        action_prefix: non_blank(&query.action),
        search: non_blank(&query.search),
        ip: non_blank(&query.ip).map(|ip| match query.ip_match {
            IpMatch::Exact => IpFilter::Exact(ip),
            IpMatch::Contains => IpFilter::Contains(ip),
        }),
        ..Default::default()
    }
}

/// `created_at` bounds for an export
fn export_window(
    request: &ExportRequest,
    now: DateTime<Utc>,
) -> ServiceResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let days_back = |days: i64| days_before(now, days).map(Some);
    let window = match request.date_range {
        DateRange::All => (None, None),
        DateRange::Today => (Some(start_of_day(now.date_naive())), None),
        DateRange::Week => (days_back(7)?, None),
        DateRange::Month => (days_back(30)?, None),
        DateRange::Quarter => (days_back(90)?, None),
        DateRange::Year => (days_back(365)?, None),
        DateRange::Custom => {
            if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
                if end < start {
                    return Err(ServiceError::validation(
                        "end_date must not be before start_date",
                    ));
                }
            }
            (
                request.start_date.map(start_of_day),
                request.end_date.map(end_of_day_exclusive),
            )
        }
    };
    Ok(window)
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn push_csv_row<'v>(out: &mut String, fields: impl IntoIterator<Item = Cow<'v, str>>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&field);
    }
    out.push_str("\r\n");
}

/// CSV document with the export header and one row per record
fn render_csv(records: &[ActivityRecord], include_ip: bool, include_entity_refs: bool) -> String {
    let mut out = String::new();

    let mut header = vec!["ID", "Timestamp", "User", "Action", "Description"];
    if include_ip {
        header.push("IP Address");
    }
    if include_entity_refs {
        header.extend(["Member ID", "Publication ID"]);
    }
    push_csv_row(&mut out, header.into_iter().map(Cow::Borrowed));

    let optional_id = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();
    for record in records {
        let entry = &record.entry;
        let mut row = vec![
            entry.id.map(|id| id.to_string()).unwrap_or_default(),
            entry.created_at.format(CSV_TIMESTAMP_FORMAT).to_string(),
            record.user_display().to_string(),
            entry.action.clone(),
            entry.description.clone(),
        ];
        if include_ip {
            row.push(entry.ip_address.clone());
        }
        if include_entity_refs {
            row.push(optional_id(entry.member_id));
            row.push(optional_id(entry.publication_id));
        }
        push_csv_row(&mut out, row.iter().map(|field| csv_field(field)));
    }

    out
}
