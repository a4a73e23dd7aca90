//! Activity log entity - an immutable audit record of a user action

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Placeholder address recorded when the client IP cannot be determined
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Name rendered for rows whose user no longer resolves
pub const UNKNOWN_USER: &str = "Unknown User";

/// Activity log entry.
///
/// An entry is built once by the activity logger and appended. After the
/// store assigns an `id` it is read-only; rows are only ever removed in
/// bulk by the retention sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    pub id: Option<i64>,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub ip_address: String,
    pub member_id: Option<i64>,
    pub publication_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    /// Build a new, unsaved entry. A blank IP address becomes [`UNKNOWN_IP`].
    pub fn new(
        user_id: i64,
        action: impl Into<String>,
        description: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let action = action.into();
        let description = description.into();
        if action.trim().is_empty() {
            return Err(DomainError::ValidationError("Action is required".into()));
        }
        if description.trim().is_empty() {
            return Err(DomainError::ValidationError("Description is required".into()));
        }

        let ip_address = ip_address.into();
        let ip_address = if ip_address.trim().is_empty() {
            UNKNOWN_IP.to_string()
        } else {
            ip_address
        };

        Ok(Self {
            id: None,
            user_id,
            action,
            description,
            ip_address,
            member_id: None,
            publication_id: None,
            created_at: Utc::now(),
        })
    }

    /// Attach the member the action concerned
    pub fn with_member(mut self, member_id: Option<i64>) -> Self {
        self.member_id = member_id;
        self
    }

    /// Attach the publication the action concerned
    pub fn with_publication(mut self, publication_id: Option<i64>) -> Self {
        self.publication_id = publication_id;
        self
    }

    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Persisted entries cannot be written again
    pub fn ensure_writable(&self) -> Result<(), DomainError> {
        if self.is_persisted() {
            return Err(DomainError::ActivityLogImmutable);
        }
        Ok(())
    }

    /// Individual entries are never deletable; only the retention sweep removes rows
    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        Err(DomainError::ActivityLogNotDeletable)
    }
}

/// An activity entry together with the acting user's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub entry: ActivityLog,
    pub user_name: Option<String>,
}

impl ActivityRecord {
    /// The acting user's name, or [`UNKNOWN_USER`]
    pub fn user_display(&self) -> &str {
        self.user_name.as_deref().unwrap_or(UNKNOWN_USER)
    }
}
