//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Sponsor not configured")]
    SponsorNotFound,

    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    #[error("Publication not found: {0}")]
    PublicationNotFound(i64),

    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    #[error("Author not found: {0}")]
    AuthorNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Article is not ready for review: {}", .0.join("; "))]
    SubmissionIncomplete(Vec<String>),

    #[error("A comment is required when returning an article for revision")]
    MissingRevisionComment,

    #[error("A reason is required when withdrawing an article")]
    MissingWithdrawalReason,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator role required")]
    AdminRequired,

    #[error("User account is inactive")]
    UserInactive,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("A member with this contact email already exists")]
    MemberEmailExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Only draft articles can be submitted for review")]
    ArticleNotInDraft,

    #[error("Only articles in review can be approved or returned")]
    ArticleNotInReview,

    #[error("Only articles ready for publication can be published")]
    ArticleNotReady,

    #[error("Only published articles can be withdrawn")]
    ArticleNotPublished,

    #[error("Only draft articles can be edited")]
    ArticleLocked,

    #[error("Activity log entries cannot be modified after creation")]
    ActivityLogImmutable,

    #[error("Activity log entries cannot be deleted individually")]
    ActivityLogNotDeletable,

    #[error("Cannot delete your own account")]
    CannotDeleteSelf,

    #[error("Member is inactive")]
    MemberInactive,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::SponsorNotFound => "UNKNOWN_SPONSOR",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::PublicationNotFound(_) => "UNKNOWN_PUBLICATION",
            Self::ArticleNotFound(_) => "UNKNOWN_ARTICLE",
            Self::AuthorNotFound(_) => "UNKNOWN_AUTHOR",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::UnknownEntityType(_) => "UNKNOWN_ENTITY_TYPE",
            Self::SubmissionIncomplete(_) => "SUBMISSION_INCOMPLETE",
            Self::MissingRevisionComment => "MISSING_REVISION_COMMENT",
            Self::MissingWithdrawalReason => "MISSING_WITHDRAWAL_REASON",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::UserInactive => "USER_INACTIVE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::MemberEmailExists => "MEMBER_EMAIL_EXISTS",

            // Business Rules
            Self::ArticleNotInDraft
            | Self::ArticleNotInReview
            | Self::ArticleNotReady
            | Self::ArticleNotPublished => "INVALID_STATUS_TRANSITION",
            Self::ArticleLocked => "ARTICLE_LOCKED",
            Self::ActivityLogImmutable => "ACTIVITY_LOG_IMMUTABLE",
            Self::ActivityLogNotDeletable => "ACTIVITY_LOG_NOT_DELETABLE",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",
            Self::MemberInactive => "MEMBER_INACTIVE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::SponsorNotFound
                | Self::MemberNotFound(_)
                | Self::PublicationNotFound(_)
                | Self::ArticleNotFound(_)
                | Self::AuthorNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::UnknownEntityType(_)
                | Self::SubmissionIncomplete(_)
                | Self::MissingRevisionComment
                | Self::MissingWithdrawalReason
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AdminRequired | Self::UserInactive)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::MemberEmailExists)
    }

    /// Check if the operation was refused because of the entity's current state
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::ArticleNotInDraft
                | Self::ArticleNotInReview
                | Self::ArticleNotReady
                | Self::ArticleNotPublished
                | Self::ArticleLocked
                | Self::ActivityLogImmutable
                | Self::ActivityLogNotDeletable
                | Self::CannotDeleteSelf
                | Self::MemberInactive
        )
    }

    /// HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() {
            400
        } else if self.is_conflict() || self.is_rule_violation() {
            409
        } else {
            500
        }
    }
}
