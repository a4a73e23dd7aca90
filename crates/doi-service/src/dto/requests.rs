//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and, where they carry user
//! input, `Validate`.

use chrono::NaiveDate;
use doi_core::entities::{
    AuthorSequence, ContributorRole, PdfStatus, PublicationType, UserRole,
};
use serde::Deserialize;
use validator::Validate;

/// Default page size for listings
pub const DEFAULT_PER_PAGE: i64 = 20;
/// Largest page size a caller may request
pub const MAX_PER_PAGE: i64 = 100;

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

/// Page/offset pair after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Clamp `page` to >= 1 and `per_page` to 1..=100
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip; saturates at `i64::MAX` so absurd page numbers read past the end
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Active-flag filter used by member and publication listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Password change for the current user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub new_password: String,
}

/// Profile update for the current user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 255, message = "Full name must be 2-255 characters"))]
    pub full_name: String,
}

// ============================================================================
// User Requests (admin)
// ============================================================================

/// Create a back-office user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 255, message = "Full name must be 2-255 characters"))]
    pub full_name: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,
}

/// Update a back-office user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 255, message = "Full name must be 2-255 characters"))]
    pub full_name: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,
}

/// User listing parameters
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

// ============================================================================
// Sponsor Requests
// ============================================================================

/// Create or replace the sponsor record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSponsorRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 50, message = "Crossref member id must be 1-50 characters"))]
    pub crossref_member_id: String,

    pub is_active: Option<bool>,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Create member request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Institution must be 1-255 characters"))]
    pub institution: String,

    #[validate(email(message = "Invalid email format"))]
    pub contact_email: String,

    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,

    #[validate(length(min = 1, message = "Billing address is required"))]
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

    #[serde(default)]
    pub vat_registered: bool,

    #[validate(length(equal = 2, message = "Tax country must be a two-letter code"))]
    pub tax_country: Option<String>,
}

/// Update member request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Institution must be 1-255 characters"))]
    pub institution: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,

    #[validate(length(min = 1, message = "Billing address is required"))]
    pub billing_address: Option<String>,

    pub pib: Option<String>,
    pub registration_number: Option<String>,
    pub personal_id: Option<String>,
    pub activity_code: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
    pub swift_bic: Option<String>,
    pub vat_registered: Option<bool>,

    #[validate(length(equal = 2, message = "Tax country must be a two-letter code"))]
    pub tax_country: Option<String>,
}

/// Member listing parameters
#[derive(Debug, Clone, Deserialize)]
pub struct MemberListQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

/// Autocomplete search parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub publication_type: Option<PublicationType>,
    pub limit: Option<i64>,
}

/// Entities covered by the unified search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    All,
    Members,
    Publications,
}

impl SearchScope {
    pub fn includes_members(self) -> bool {
        matches!(self, Self::All | Self::Members)
    }

    pub fn includes_publications(self) -> bool {
        matches!(self, Self::All | Self::Publications)
    }
}

/// Unified search over members and publications
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub scope: SearchScope,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

impl Default for GlobalSearchQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            scope: SearchScope::All,
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// Typeahead suggestions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

// ============================================================================
// Publication Requests
// ============================================================================

/// Create publication request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePublicationRequest {
    #[serde(rename = "type", alias = "publication_type")]
    pub publication_type: PublicationType,

    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Subtitle must be at most 500 characters"))]
    pub subtitle: Option<String>,

    pub language_code: Option<String>,

    #[serde(flatten)]
    pub identifiers: PublicationIdentifiers,
}

/// Update publication request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePublicationRequest {
    #[serde(rename = "type", alias = "publication_type")]
    pub publication_type: Option<PublicationType>,

    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Subtitle must be at most 500 characters"))]
    pub subtitle: Option<String>,

    pub language_code: Option<String>,

    #[serde(flatten)]
    pub identifiers: PublicationIdentifiers,
}

/// Type-specific identifier fields shared by create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationIdentifiers {
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
}

/// Publication listing parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PublicationListQuery {
    #[serde(rename = "type")]
    pub publication_type: Option<PublicationType>,
    #[serde(default)]
    pub status: StatusFilter,
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

// ============================================================================
// Activity Requests
// ============================================================================

/// How the IP filter is compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpMatch {
    #[default]
    Exact,
    Contains,
}

/// Activity log listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    /// Inclusive
    pub start_date: Option<NaiveDate>,
    /// Inclusive; the whole day is covered
    pub end_date: Option<NaiveDate>,
    pub user_id: Option<i64>,
    /// Action prefix, e.g. `create` or `create_member`
    #[serde(alias = "action_type")]
    pub action: Option<String>,
    pub search: Option<String>,
    #[serde(alias = "ip_address")]
    pub ip: Option<String>,
    #[serde(default)]
    pub ip_match: IpMatch,
}

/// Recent activity parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecentActivityQuery {
    pub limit: Option<i64>,
    pub user_id: Option<i64>,
    /// Accepted for compatibility; there is a single sponsor
    pub sponsor_id: Option<i64>,
}

/// Statistics window parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityStatisticsQuery {
    pub user_id: Option<i64>,
    pub sponsor_id: Option<i64>,
    pub days: Option<i64>,
}

/// Export time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

/// CSV export options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub date_range: DateRange,
    /// Used with `custom`
    pub start_date: Option<NaiveDate>,
    /// Used with `custom`; inclusive
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub include_ip: bool,
    #[serde(default)]
    pub include_entity_refs: bool,
}

/// Retention sweep request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanupRequest {
    pub retention_days: Option<i64>,
}

// ============================================================================
// Article Requests
// ============================================================================

/// Create article request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticleRequest {
    pub publication_id: Option<i64>,

    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
}

/// Update article request; only allowed while drafting
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    pub publication_id: Option<i64>,

    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    pub title: Option<String>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Add an author to an article
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAuthorRequest {
    #[validate(length(max = 255, message = "Given name must be at most 255 characters"))]
    pub given_name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Surname must be 1-255 characters"))]
    pub surname: String,

    pub suffix: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub orcid: Option<String>,

    #[serde(default)]
    pub sequence: AuthorSequence,

    #[serde(default)]
    pub contributor_role: ContributorRole,

    #[serde(default)]
    pub is_corresponding: bool,

    pub order: Option<i32>,
}

/// Attach an institution to an author
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAffiliationRequest {
    #[validate(length(min = 1, max = 500, message = "Institution name must be 1-500 characters"))]
    pub institution_name: String,

    pub institution_ror_id: Option<String>,

    #[validate(length(max = 500, message = "Department must be at most 500 characters"))]
    pub department: Option<String>,

    pub order: Option<i32>,
}

/// Record the outcome of the file scan
#[derive(Debug, Clone, Deserialize)]
pub struct SetPdfStatusRequest {
    pub pdf_status: PdfStatus,
}

/// Return an article to its author
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnArticleRequest {
    #[serde(default)]
    pub comment: String,
}

/// Withdraw a published article
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawArticleRequest {
    #[serde(default)]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(0, 500);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, MAX_PER_PAGE);
        assert_eq!(page.offset(), 0);

        let page = PageRequest::new(3, 20);
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn test_page_request_offset_saturates() {
        let page = PageRequest::new(i64::MAX, 100);
        assert_eq!(page.offset(), i64::MAX);

        let page = PageRequest::new(i64::MAX / 100 + 1, 100);
        assert_eq!(page.offset(), i64::MAX);

        let page = PageRequest::new(i64::MIN, 100);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_search_scope() {
        let query: GlobalSearchQuery = serde_json::from_str(r#"{"q":"acme"}"#).unwrap();
        assert_eq!(query.scope, SearchScope::All);
        assert_eq!(query.page, 1);
        assert!(query.scope.includes_members() && query.scope.includes_publications());

        let query: GlobalSearchQuery =
            serde_json::from_str(r#"{"q":"acme","scope":"publications"}"#).unwrap();
        assert!(!query.scope.includes_members());
        assert!(query.scope.includes_publications());
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(StatusFilter::All.as_flag(), None);
        assert_eq!(StatusFilter::Active.as_flag(), Some(true));
        assert_eq!(StatusFilter::Inactive.as_flag(), Some(false));
    }

    #[test]
    fn test_change_password_validation() {
        let request = ChangePasswordRequest {
            current_password: "old-secret".to_string(),
            new_password: "12345".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_member_validation() {
        let request: CreateMemberRequest = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "institution": "Acme Institute",
            "contact_email": "not-an-email",
            "billing_address": "Main Street 1",
            "pib": "100123456",
            "registration_number": "07001234"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("contact_email"));
    }

    #[test]
    fn test_export_request_defaults() {
        let request: ExportRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.date_range, DateRange::All);
        assert!(!request.include_ip);
        assert!(!request.include_entity_refs);
    }

    #[test]
    fn test_create_publication_accepts_type_key() {
        let request: CreatePublicationRequest = serde_json::from_value(serde_json::json!({
            "type": "book_series",
            "title": "Series",
            "series_issn": "0317-8471"
        }))
        .unwrap();

        assert_eq!(request.publication_type, PublicationType::BookSeries);
        assert_eq!(request.identifiers.series_issn.as_deref(), Some("0317-8471"));
    }
}
