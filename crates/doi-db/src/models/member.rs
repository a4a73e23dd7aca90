//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub sponsor_id: i64,
    pub name: String,
    pub institution: String,
    pub contact_email: String,
    pub website_url: Option<String>,
    pub billing_address: String,
    pub pib: String,
    pub registration_number: String,
    pub personal_id: Option<String>,
    pub activity_code: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
    pub swift_bic: Option<String>,
    pub vat_registered: bool,
    pub tax_country: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate counts row
#[derive(Debug, Clone, FromRow)]
pub struct MemberStatsModel {
    pub total: i64,
    pub active: i64,
    pub with_publications: i64,
}
