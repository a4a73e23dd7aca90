//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table (password hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
