//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in doi-core.
//! Each repository handles database operations for a specific domain entity.

mod activity_log;
mod article;
mod error;
mod member;
mod publication;
mod sponsor;
mod user;

pub use activity_log::PgActivityLogRepository;
pub use article::{PgArticleRepository, PgAuthorRepository};
pub use member::PgMemberRepository;
pub use publication::PgPublicationRepository;
pub use sponsor::PgSponsorRepository;
pub use user::PgUserRepository;
