//! PostgreSQL implementation of ActivityLogRepository
//!
//! The table is append-only from this crate's point of view: there is an
//! insert, filtered reads, and one bulk age-based delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::{ActivityLog, ActivityRecord};
use doi_core::traits::{ActionCount, ActivityLogRepository, ActivityQuery, IpFilter, RepoResult};

use crate::models::{ActionCountModel, ActivityLogModel, ActivityRecordModel};

use super::error::{escape_like, map_db_error};

macro_rules! activity_filter {
    () => {
        r"
        WHERE ($1::TIMESTAMPTZ IS NULL OR a.created_at >= $1)
          AND ($2::TIMESTAMPTZ IS NULL OR a.created_at < $2)
          AND ($3::BIGINT IS NULL OR a.user_id = $3)
          AND ($4::TEXT IS NULL OR a.action LIKE $4 || '%')
          AND ($5::TEXT IS NULL OR a.description ILIKE '%' || $5 || '%')
          AND ($6::TEXT IS NULL OR a.ip_address = $6)
          AND ($7::TEXT IS NULL OR a.ip_address LIKE '%' || $7 || '%')
          AND ($8::BIGINT IS NULL OR a.member_id = $8)
          AND ($9::BIGINT IS NULL OR a.publication_id = $9)
        "
    };
}

/// Bind values for [`activity_filter!`], with LIKE input escaped
struct FilterBinds {
    created_from: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
    user_id: Option<i64>,
    action_prefix: Option<String>,
    search: Option<String>,
    ip_exact: Option<String>,
    ip_contains: Option<String>,
    member_id: Option<i64>,
    publication_id: Option<i64>,
}

impl From<&ActivityQuery> for FilterBinds {
    fn from(query: &ActivityQuery) -> Self {
        let (ip_exact, ip_contains) = match &query.ip {
            Some(IpFilter::Exact(ip)) => (Some(ip.clone()), None),
            Some(IpFilter::Contains(ip)) => (None, Some(escape_like(ip))),
            None => (None, None),
        };

        Self {
            created_from: query.created_from,
            created_before: query.created_before,
            user_id: query.user_id,
            action_prefix: query.action_prefix.as_deref().map(escape_like),
            search: query.search.as_deref().map(escape_like),
            ip_exact,
            ip_contains,
            member_id: query.member_id,
            publication_id: query.publication_id,
        }
    }
}

/// PostgreSQL implementation of ActivityLogRepository
#[derive(Clone)]
pub struct PgActivityLogRepository {
    pool: PgPool,
}

impl PgActivityLogRepository {
    /// Create a new PgActivityLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PgActivityLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action, user_id = entry.user_id))]
    async fn append(&self, entry: &ActivityLog) -> RepoResult<ActivityLog> {
        entry.ensure_writable()?;

        let model = sqlx::query_as::<_, ActivityLogModel>(
            r"
            INSERT INTO activity_logs (user_id, action, description, ip_address, member_id,
                                       publication_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, action, description, ip_address, member_id, publication_id,
                      created_at
            ",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.description)
        .bind(&entry.ip_address)
        .bind(entry.member_id)
        .bind(entry.publication_id)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ActivityQuery) -> RepoResult<Vec<ActivityRecord>> {
        let binds = FilterBinds::from(query);

        let results = sqlx::query_as::<_, ActivityRecordModel>(concat!(
            r"
            SELECT a.id, a.user_id, a.action, a.description, a.ip_address, a.member_id,
                   a.publication_id, a.created_at, u.full_name AS user_name
            FROM activity_logs a
            LEFT JOIN users u ON u.id = a.user_id
            ",
            activity_filter!(),
            " ORDER BY a.created_at DESC, a.id DESC LIMIT $10 OFFSET $11"
        ))
        .bind(binds.created_from)
        .bind(binds.created_before)
        .bind(binds.user_id)
        .bind(binds.action_prefix)
        .bind(binds.search)
        .bind(binds.ip_exact)
        .bind(binds.ip_contains)
        .bind(binds.member_id)
        .bind(binds.publication_id)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ActivityQuery) -> RepoResult<i64> {
        let binds = FilterBinds::from(query);

        sqlx::query_scalar::<_, i64>(concat!(
            "SELECT COUNT(*) FROM activity_logs a ",
            activity_filter!()
        ))
        .bind(binds.created_from)
        .bind(binds.created_before)
        .bind(binds.user_id)
        .bind(binds.action_prefix)
        .bind(binds.search)
        .bind(binds.ip_exact)
        .bind(binds.ip_contains)
        .bind(binds.member_id)
        .bind(binds.publication_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_action(
        &self,
        since: DateTime<Utc>,
        user_id: Option<i64>,
    ) -> RepoResult<Vec<ActionCount>> {
        // Grouped by the full tag; prefix bucketing happens in the service so
        // the result does not depend on database string functions
        let rows = sqlx::query_as::<_, ActionCountModel>(
            r"
            SELECT action, COUNT(*) AS count
            FROM activity_logs
            WHERE created_at >= $1
              AND ($2::BIGINT IS NULL OR user_id = $2)
            GROUP BY action
            ORDER BY action
            ",
        )
        .bind(since)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ActionCount::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM activity_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
