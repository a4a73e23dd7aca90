//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and takes an explicit
//! [`RequestContext`] for anything that needs the caller or their address.

pub mod activity;
pub mod activity_logger;
pub mod article;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod member;
pub mod publication;
pub mod request_context;
pub mod search;
pub mod sponsor;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use activity::ActivityService;
pub use activity_logger::{ActivityLogger, ActorOverride, AuthSubject, NewActivity};
pub use article::ArticleService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use publication::PublicationService;
pub use request_context::RequestContext;
pub use search::SearchService;
pub use sponsor::SponsorService;
pub use user::UserService;

/// Trim an optional text field; blank input becomes `None`
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Apply a partial update to an optional text field.
///
/// `None` leaves the field alone; a blank string clears it.
pub(crate) fn apply_optional(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = trimmed(value);
    }
}
