//! Sponsor database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for sponsors table
#[derive(Debug, Clone, FromRow)]
pub struct SponsorModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub crossref_member_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
