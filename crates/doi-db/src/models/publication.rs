//! Publication database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for publications table
#[derive(Debug, Clone, FromRow)]
pub struct PublicationModel {
    pub id: i64,
    pub member_id: i64,
    pub publication_type: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub language_code: String,
    pub journal_abbreviated_title: Option<String>,
    pub journal_issn: Option<String>,
    pub journal_electronic_issn: Option<String>,
    pub journal_coden: Option<String>,
    pub series_title: Option<String>,
    pub series_issn: Option<String>,
    pub series_electronic_issn: Option<String>,
    pub set_title: Option<String>,
    pub set_isbn: Option<String>,
    pub set_electronic_isbn: Option<String>,
    pub isbn: Option<String>,
    pub electronic_isbn: Option<String>,
    pub edition_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Count per publication type
#[derive(Debug, Clone, FromRow)]
pub struct PublicationTypeCountModel {
    pub publication_type: String,
    pub total: i64,
    pub active: i64,
}
