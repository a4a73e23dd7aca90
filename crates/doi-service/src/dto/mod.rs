//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ActivityListQuery, ActivityStatisticsQuery, ChangePasswordRequest, CleanupRequest,
    CreateAffiliationRequest, CreateArticleRequest, CreateAuthorRequest, CreateMemberRequest,
    CreatePublicationRequest, CreateUserRequest, DateRange, ExportRequest, GlobalSearchQuery,
    IpMatch, LoginRequest, MemberListQuery, PageRequest, PublicationIdentifiers,
    PublicationListQuery, RecentActivityQuery, RefreshTokenRequest, ReturnArticleRequest,
    SearchQuery, SearchScope, SetPdfStatusRequest, StatusFilter, SuggestionQuery,
    UpdateArticleRequest, UpdateMemberRequest, UpdateProfileRequest, UpdatePublicationRequest,
    UpdateUserRequest, UpsertSponsorRequest, UserListQuery, WithdrawArticleRequest,
    DEFAULT_PER_PAGE, MAX_PER_PAGE,
};

// Re-export commonly used response types
pub use responses::{
    ActivityResponse, ActivityStatistics, ActivityStatsResponse, AffiliationResponse,
    ArticleResponse, AuthResponse, AuthorResponse, CleanupResponse, CsvExport, DashboardResponse,
    DashboardSummary, GlobalSearchResponse, HealthChecks, HealthResponse, MemberResponse,
    MemberSearchResult, MemberStatsResponse, MessageResponse, PaginatedResponse, PaginationMeta,
    PublicationCountsResponse, PublicationResponse, PublicationSearchResult, ReadinessResponse,
    SearchHit, SearchSuggestion, SponsorResponse, UserResponse,
};

pub use mappers::article_status_counts;
