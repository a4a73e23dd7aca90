//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ActivityLog, ActivityRecord, Affiliation, Article, ArticleStatus, Author, Member, Publication,
    PublicationType, Sponsor, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by (lowercased) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// List users ordered by name
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;

    /// Insert a user and return it with its assigned id
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User>;

    /// Update name, role and active flag
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete; the user's activity rows cascade
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Stamp the last successful login
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Sponsor Repository
// ============================================================================

#[async_trait]
pub trait SponsorRepository: Send + Sync {
    /// The configured sponsor, if any
    async fn get(&self) -> RepoResult<Option<Sponsor>>;

    /// Create the sponsor or replace the existing record
    async fn upsert(&self, sponsor: &Sponsor) -> RepoResult<Sponsor>;
}

// ============================================================================
// Member Repository
// ============================================================================

/// Filter options for member listings
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    /// Case-insensitive substring over name, institution and contact email
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// Aggregate member counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub with_publications: i64,
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>>;

    /// List members ordered by name
    async fn find_many(&self, query: &MemberQuery) -> RepoResult<Vec<Member>>;

    /// Count members matching the query (limit/offset ignored)
    async fn count(&self, query: &MemberQuery) -> RepoResult<i64>;

    /// Check for another member of the sponsor using this contact email
    async fn contact_email_exists(
        &self,
        sponsor_id: i64,
        email: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<bool>;

    /// Insert a member and return it with its assigned id
    async fn create(&self, member: &Member) -> RepoResult<Member>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Delete a member and its publications
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Active members whose name or institution contains `term`
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Member>>;

    /// Aggregate counts
    async fn stats(&self) -> RepoResult<MemberStats>;
}

// ============================================================================
// Publication Repository
// ============================================================================

/// Filter options for publication listings
#[derive(Debug, Clone, Default)]
pub struct PublicationQuery {
    pub member_id: Option<i64>,
    pub publication_type: Option<PublicationType>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring over title and subtitle
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Aggregate publication counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationStats {
    pub total: i64,
    pub active: i64,
    pub by_type: Vec<(PublicationType, i64)>,
}

#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Find publication by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Publication>>;

    /// List publications ordered by title
    async fn find_many(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>>;

    /// Count publications matching the query (limit/offset ignored)
    async fn count(&self, query: &PublicationQuery) -> RepoResult<i64>;

    /// Insert a publication and return it with its assigned id
    async fn create(&self, publication: &Publication) -> RepoResult<Publication>;

    /// Update an existing publication
    async fn update(&self, publication: &Publication) -> RepoResult<()>;

    /// Delete a publication
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Aggregate counts, optionally for one member
    async fn stats(&self, member_id: Option<i64>) -> RepoResult<PublicationStats>;
}

// ============================================================================
// Activity Log Repository
// ============================================================================

/// How an IP filter is matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpFilter {
    Exact(String),
    Contains(String),
}

/// Filter options for activity queries. Results are always newest first.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    /// Inclusive lower bound on `created_at`
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`
    pub created_before: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
    /// Matches actions starting with this text
    pub action_prefix: Option<String>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub ip: Option<IpFilter>,
    pub member_id: Option<i64>,
    pub publication_id: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

/// Row count for one full action tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCount {
    pub action: String,
    pub count: i64,
}

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Insert a new entry and return it with its id.
    ///
    /// Fails with `ActivityLogImmutable` if the entry already has an id.
    async fn append(&self, entry: &ActivityLog) -> RepoResult<ActivityLog>;

    /// Entries matching the query with the acting user's name
    async fn find_many(&self, query: &ActivityQuery) -> RepoResult<Vec<ActivityRecord>>;

    /// Count entries matching the query (limit/offset ignored)
    async fn count(&self, query: &ActivityQuery) -> RepoResult<i64>;

    /// Counts grouped by full action tag for entries created at or after `since`
    async fn count_by_action(
        &self,
        since: DateTime<Utc>,
        user_id: Option<i64>,
    ) -> RepoResult<Vec<ActionCount>>;

    /// Bulk delete every entry created before `cutoff`, returning the number removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Article Repository
// ============================================================================

/// A change applied to an article while its row is locked
pub type ArticleMutation = Box<dyn FnOnce(&mut Article) -> Result<(), DomainError> + Send>;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find article by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Article>>;

    /// Insert an article and return it with its assigned id
    async fn create(&self, article: &Article) -> RepoResult<Article>;

    /// Lock the row, apply `mutation` to the locked state and write it back.
    ///
    /// The mutation sees the row as of lock acquisition, so two concurrent
    /// callers never both observe the same source state. If the mutation
    /// fails nothing is written and its error is returned.
    async fn update_locked(&self, id: i64, mutation: ArticleMutation) -> RepoResult<Article>;

    /// Article counts per status
    async fn count_by_status(&self) -> RepoResult<Vec<(ArticleStatus, i64)>>;
}

// ============================================================================
// Author Repository
// ============================================================================

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Authors of an article in display order
    async fn find_by_article(&self, article_id: i64) -> RepoResult<Vec<Author>>;

    /// Number of authors on an article
    async fn count_by_article(&self, article_id: i64) -> RepoResult<i64>;

    /// Find author by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Author>>;

    /// Insert an author and return it with its assigned id
    async fn create(&self, author: &Author) -> RepoResult<Author>;

    /// Affiliations of every author on an article, in display order
    async fn find_affiliations_by_article(&self, article_id: i64) -> RepoResult<Vec<Affiliation>>;

    /// Affiliations of one author in display order
    async fn find_affiliations(&self, author_id: i64) -> RepoResult<Vec<Affiliation>>;

    /// Insert an affiliation and return it with its assigned id
    async fn create_affiliation(&self, affiliation: &Affiliation) -> RepoResult<Affiliation>;
}
