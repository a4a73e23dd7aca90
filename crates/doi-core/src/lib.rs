//! # doi-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityLog, ActivityRecord, Affiliation, Article, ArticleStatus, Author, AuthorSequence,
    ContributorRole, Member, PdfStatus, Publication, PublicationType, Sponsor, User, UserRole,
    UNKNOWN_IP, UNKNOWN_USER,
};
pub use error::DomainError;
pub use traits::{
    ActionCount, ActivityLogRepository, ActivityQuery, ArticleMutation, ArticleRepository,
    AuthorRepository, IpFilter, MemberQuery, MemberRepository, MemberStats, PublicationQuery,
    PublicationRepository, PublicationStats, RepoResult, SponsorRepository, UserRepository,
};
pub use value_objects::{action_prefix, AuthAction, EntityAction, EntityType, SYSTEM_CLEANUP};
