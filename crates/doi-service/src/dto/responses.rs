//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with page-number pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, per_page, total),
        }
    }

    /// Convert every item, keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// User / Sponsor Responses
// ============================================================================

/// Back-office user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The sponsor organization
#[derive(Debug, Clone, Serialize)]
pub struct SponsorResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub crossref_member_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member with every stored field
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
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

/// Autocomplete entry
#[derive(Debug, Clone, Serialize)]
pub struct MemberSearchResult {
    pub id: i64,
    pub name: String,
    pub institution: String,
}

/// Aggregate member counts
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemberStatsResponse {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub with_publications: i64,
}

// ============================================================================
// Publication Responses
// ============================================================================

/// Publication with every stored field
#[derive(Debug, Clone, Serialize)]
pub struct PublicationResponse {
    pub id: i64,
    pub member_id: i64,
    #[serde(rename = "type")]
    pub publication_type: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub language_code: String,
    pub primary_identifier: Option<String>,
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

/// Autocomplete entry
#[derive(Debug, Clone, Serialize)]
pub struct PublicationSearchResult {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub publication_type: String,
    pub primary_identifier: Option<String>,
}

/// Publication counts, every type present
#[derive(Debug, Clone, Serialize)]
pub struct PublicationCountsResponse {
    pub total: i64,
    pub active: i64,
    pub by_type: BTreeMap<String, i64>,
}

// ============================================================================
// Activity Responses
// ============================================================================

/// One activity log row
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub action: String,
    pub description: String,
    pub ip_address: String,
    pub member_id: Option<i64>,
    pub publication_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Activity counts over a time window, grouped by action prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityStatistics {
    pub total_activities: i64,
    pub action_breakdown: BTreeMap<String, i64>,
    pub period_days: i64,
}

/// Statistics for the last day, week and month
#[derive(Debug, Clone, Serialize)]
pub struct ActivityStatsResponse {
    pub today: ActivityStatistics,
    pub week: ActivityStatistics,
    pub month: ActivityStatistics,
}

/// Outcome of a retention sweep
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CleanupResponse {
    pub deleted_count: u64,
    pub retention_days: i64,
}

/// A rendered CSV document
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardSummary {
    pub total_entities: i64,
    pub active_entities: i64,
}

/// Landing page overview
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub members: MemberStatsResponse,
    pub publications: PublicationCountsResponse,
    pub articles: BTreeMap<String, i64>,
    pub recent_activities: Vec<ActivityResponse>,
    pub summary: DashboardSummary,
}

// ============================================================================
// Article Responses
// ============================================================================

/// Article with its workflow bookkeeping
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub publication_id: Option<i64>,
    pub title: String,
    #[serde(rename = "abstract")]
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

/// Article author
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub article_id: i64,
    pub display_name: String,
    pub given_name: Option<String>,
    pub surname: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub sequence: String,
    pub contributor_role: String,
    pub is_corresponding: bool,
    pub order: i32,
    pub affiliations: Vec<AffiliationResponse>,
}

/// Author affiliation
#[derive(Debug, Clone, Serialize)]
pub struct AffiliationResponse {
    pub id: i64,
    pub author_id: i64,
    pub display_name: String,
    pub institution_name: String,
    pub institution_ror_id: Option<String>,
    pub department: Option<String>,
    pub order: i32,
}

// ============================================================================
// Search Responses
// ============================================================================

/// One ranked hit of the unified search
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// API path of the entity
    pub url: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub relevance: i32,
    pub created_at: DateTime<Utc>,
}

/// Unified search results, best match first
#[derive(Debug, Clone, Serialize)]
pub struct GlobalSearchResponse {
    pub query: String,
    pub members_count: i64,
    pub publications_count: i64,
    pub results: Vec<SearchHit>,
    pub pagination: PaginationMeta,
}

/// Typeahead entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSuggestion {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub text: String,
    pub label: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
