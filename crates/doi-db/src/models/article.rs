//! Article, author and affiliation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for articles table
#[derive(Debug, Clone, FromRow)]
pub struct ArticleModel {
    pub id: i64,
    pub publication_id: Option<i64>,
    pub title: String,
    #[sqlx(rename = "abstract")]
    pub abstract_text: String,
    pub pdf_status: String,
    pub status: String,
    pub created_by: Option<i64>,
    pub submitted_by: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub revision_comment: Option<String>,
    pub returned_by: Option<i64>,
    pub returned_at: Option<DateTime<Utc>>,
    pub published_by: Option<i64>,
    pub published_at: Option<DateTime<Utc>>,
    pub withdrawal_reason: Option<String>,
    pub withdrawn_by: Option<i64>,
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for authors table
#[derive(Debug, Clone, FromRow)]
pub struct AuthorModel {
    pub id: i64,
    pub article_id: i64,
    pub given_name: Option<String>,
    pub surname: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub sequence: String,
    pub contributor_role: String,
    pub is_corresponding: bool,
    pub author_order: i32,
}

/// Database model for affiliations table
#[derive(Debug, Clone, FromRow)]
pub struct AffiliationModel {
    pub id: i64,
    pub author_id: i64,
    pub institution_name: String,
    pub institution_ror_id: Option<String>,
    pub department: Option<String>,
    pub affiliation_order: i32,
}
