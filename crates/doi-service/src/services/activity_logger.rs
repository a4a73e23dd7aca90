//! Activity logger - the only write path into the activity log
//!
//! Every method returns `Option`: a failure to record an activity is logged
//! and swallowed so the operation that triggered it is never affected.

use doi_core::entities::{ActivityLog, Member, Publication, User};
use doi_core::{AuthAction, EntityAction, EntityType};
use tracing::{debug, error, instrument, warn};

use super::context::ServiceContext;
use super::request_context::RequestContext;

const UNKNOWN_SPONSOR: &str = "Unknown Sponsor";
const UNKNOWN_MEMBER: &str = "Unknown Member";

/// An activity to record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: i64,
    pub action: String,
    pub description: String,
    /// Overrides the request's client IP
    pub ip_address: Option<String>,
    pub member_id: Option<i64>,
    pub publication_id: Option<i64>,
}

impl NewActivity {
    pub fn new(user_id: i64, action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            user_id,
            action: action.into(),
            description: description.into(),
            ip_address: None,
            member_id: None,
            publication_id: None,
        }
    }

    pub fn with_ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_member(mut self, member_id: i64) -> Self {
        self.member_id = Some(member_id);
        self
    }

    pub fn with_publication(mut self, publication_id: i64) -> Self {
        self.publication_id = Some(publication_id);
        self
    }
}

/// Who performed an entity event when it is not (only) the request's user.
///
/// Unset fields fall back to the request context: the acting user to
/// `RequestContext::user_id`, the IP to the request's client address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorOverride<'s> {
    pub user_id: Option<i64>,
    pub ip_address: Option<&'s str>,
}

impl<'s> ActorOverride<'s> {
    /// Everything comes from the request context
    pub const NONE: Self = Self {
        user_id: None,
        ip_address: None,
    };

    pub fn user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ip_address: None,
        }
    }

    pub fn with_ip(mut self, ip_address: &'s str) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    fn acting_user(&self, request: &RequestContext) -> Option<i64> {
        self.user_id.or_else(|| request.user_id())
    }

    fn apply_ip(&self, activity: NewActivity) -> NewActivity {
        match self.ip_address {
            Some(ip) => activity.with_ip(ip),
            None => activity,
        }
    }
}

/// Subject of an authentication event
#[derive(Debug, Clone, Copy)]
pub enum AuthSubject<'u> {
    User(&'u User),
    Id(i64),
}

impl AuthSubject<'_> {
    fn user_id(&self) -> i64 {
        match self {
            Self::User(user) => user.id,
            Self::Id(id) => *id,
        }
    }

    fn display(&self) -> String {
        match self {
            Self::User(user) => user.display_name().to_string(),
            Self::Id(id) => format!("User #{id}"),
        }
    }
}

/// Records activities on behalf of the other services
pub struct ActivityLogger<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityLogger<'a> {
    /// Create a new ActivityLogger
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Insert one activity row.
    ///
    /// The IP comes from `activity.ip_address` when set, otherwise from the
    /// request context. Returns `None` if the row could not be written.
    #[instrument(skip(self, request, activity), fields(action = %activity.action, user_id = activity.user_id))]
    pub async fn log_activity(
        &self,
        request: &RequestContext,
        activity: NewActivity,
    ) -> Option<ActivityLog> {
        let ip_address = activity
            .ip_address
            .unwrap_or_else(|| request.ip_address().to_string());

        let entry = match ActivityLog::new(
            activity.user_id,
            activity.action,
            activity.description,
            ip_address,
        ) {
            Ok(entry) => entry
                .with_member(activity.member_id)
                .with_publication(activity.publication_id),
            Err(e) => {
                error!(error = %e, "Rejected activity log entry");
                return None;
            }
        };

        match self.ctx.activity_repo().append(&entry).await {
            Ok(saved) => {
                debug!(id = ?saved.id, "Activity recorded");
                Some(saved)
            }
            Err(e) => {
                error!(error = %e, action = %entry.action, "Failed to record activity");
                None
            }
        }
    }

    /// Record a member event for the overriding or the request's user
    #[instrument(skip(self, request, actor, member, changes), fields(member_id = member.id, action = action.as_str()))]
    pub async fn log_member_action(
        &self,
        request: &RequestContext,
        actor: ActorOverride<'_>,
        action: EntityAction,
        member: &Member,
        changes: &[&str],
    ) -> Option<ActivityLog> {
        let Some(user_id) = actor.acting_user(request) else {
            warn!("No acting user for member activity, not recorded");
            return None;
        };

        let sponsor = self.sponsor_name(member.sponsor_id).await;
        let description = member_description(&action, &member.name, &sponsor, changes);
        let mut activity =
            NewActivity::new(user_id, action.tag(EntityType::Member), description);
        // A deleted member can no longer be referenced
        if action != EntityAction::Delete {
            activity = activity.with_member(member.id);
        }

        self.log_activity(request, actor.apply_ip(activity)).await
    }

    /// Record a publication event for the overriding or the request's user
    #[instrument(skip(self, request, actor, publication, changes), fields(publication_id = publication.id, action = action.as_str()))]
    pub async fn log_publication_action(
        &self,
        request: &RequestContext,
        actor: ActorOverride<'_>,
        action: EntityAction,
        publication: &Publication,
        changes: &[&str],
    ) -> Option<ActivityLog> {
        let Some(user_id) = actor.acting_user(request) else {
            warn!("No acting user for publication activity, not recorded");
            return None;
        };

        let member = self.member_name(publication.member_id).await;
        let description = publication_description(&action, publication, &member, changes);
        let mut activity =
            NewActivity::new(user_id, action.tag(EntityType::Publication), description)
                .with_member(publication.member_id);
        if action != EntityAction::Delete {
            activity = activity.with_publication(publication.id);
        }

        self.log_activity(request, actor.apply_ip(activity)).await
    }

    /// Record an authentication event for `subject`
    #[instrument(skip(self, request, subject, details), fields(action = action.as_str()))]
    pub async fn log_auth_action(
        &self,
        request: &RequestContext,
        action: AuthAction,
        subject: AuthSubject<'_>,
        details: Option<&str>,
    ) -> Option<ActivityLog> {
        let description = auth_description(&action, &subject.display(), details);
        let activity = NewActivity::new(subject.user_id(), action.tag(), description);
        self.log_activity(request, activity).await
    }

    async fn sponsor_name(&self, sponsor_id: i64) -> String {
        match self.ctx.sponsor_repo().get().await {
            Ok(Some(sponsor)) if sponsor.id == sponsor_id => sponsor.name,
            Ok(_) => UNKNOWN_SPONSOR.to_string(),
            Err(e) => {
                warn!(error = %e, "Sponsor lookup failed while describing activity");
                UNKNOWN_SPONSOR.to_string()
            }
        }
    }

    async fn member_name(&self, member_id: i64) -> String {
        match self.ctx.member_repo().find_by_id(member_id).await {
            Ok(Some(member)) => member.name,
            Ok(None) => UNKNOWN_MEMBER.to_string(),
            Err(e) => {
                warn!(error = %e, "Member lookup failed while describing activity");
                UNKNOWN_MEMBER.to_string()
            }
        }
    }
}

fn changed_fields_suffix(changes: &[&str]) -> String {
    if changes.is_empty() {
        String::new()
    } else {
        format!(" - changed fields: {}", changes.join(", "))
    }
}

/// Description text for a member event
pub fn member_description(action: &EntityAction, name: &str, sponsor: &str, changes: &[&str]) -> String {
    match action {
        EntityAction::Create => format!("Created member '{name}' for sponsor '{sponsor}'"),
        EntityAction::Update => {
            format!("Updated member '{name}'{}", changed_fields_suffix(changes))
        }
        EntityAction::Activate => format!("Activated member '{name}' - marked as active"),
        EntityAction::Deactivate => format!("Deactivated member '{name}' - marked as inactive"),
        EntityAction::Delete => format!("Deleted member '{name}' from sponsor '{sponsor}'"),
        EntityAction::Other(verb) => format!("Performed '{verb}' action on member '{name}'"),
    }
}

/// Description text for a publication event
pub fn publication_description(
    action: &EntityAction,
    publication: &Publication,
    member: &str,
    changes: &[&str],
) -> String {
    let title = &publication.title;
    match action {
        EntityAction::Create => format!(
            "Created {} publication '{title}' for member '{member}'",
            publication.publication_type
        ),
        EntityAction::Update => {
            format!("Updated publication '{title}'{}", changed_fields_suffix(changes))
        }
        EntityAction::Activate => format!("Activated publication '{title}' - marked as active"),
        EntityAction::Deactivate => {
            format!("Deactivated publication '{title}' - marked as inactive")
        }
        EntityAction::Delete => format!("Deleted publication '{title}' from member '{member}'"),
        EntityAction::Other(verb) => {
            format!("Performed '{verb}' action on publication '{title}'")
        }
    }
}

/// Description text for an authentication event
pub fn auth_description(action: &AuthAction, user: &str, details: Option<&str>) -> String {
    match details.map(str::trim).filter(|d| !d.is_empty()) {
        Some(details) => format!("{} for {user}: {details}", action.label()),
        None => format!("{} for {user}", action.label()),
    }
}
