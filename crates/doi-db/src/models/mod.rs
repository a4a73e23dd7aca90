//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity_log;
mod article;
mod member;
mod publication;
mod sponsor;
mod user;

pub use activity_log::{ActionCountModel, ActivityLogModel, ActivityRecordModel};
pub use article::{AffiliationModel, ArticleModel, AuthorModel};
pub use member::{MemberModel, MemberStatsModel};
pub use publication::{PublicationModel, PublicationTypeCountModel};
pub use sponsor::SponsorModel;
pub use user::UserModel;
