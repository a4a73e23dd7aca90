//! Domain entities - core business objects

mod activity_log;
mod article;
mod author;
mod member;
mod publication;
mod sponsor;
mod user;

pub use activity_log::{ActivityLog, ActivityRecord, UNKNOWN_IP, UNKNOWN_USER};
pub use article::{Article, ArticleStatus, PdfStatus};
pub use author::{Affiliation, Author, AuthorSequence, ContributorRole, MAX_INSTITUTION_LENGTH};
pub use member::{Member, DEFAULT_TAX_COUNTRY};
pub use publication::{Publication, PublicationType, DEFAULT_LANGUAGE_CODE};
pub use sponsor::Sponsor;
pub use user::{normalize_email, User, UserRole, MIN_FULL_NAME_LENGTH};
