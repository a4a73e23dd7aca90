//! Activity log database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for activity_logs table
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogModel {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub ip_address: String,
    pub member_id: Option<i64>,
    pub publication_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Activity row joined with the acting user's name
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRecordModel {
    #[sqlx(flatten)]
    pub entry: ActivityLogModel,
    pub user_name: Option<String>,
}

/// Count per full action tag
#[derive(Debug, Clone, FromRow)]
pub struct ActionCountModel {
    pub action: String,
    pub count: i64,
}
