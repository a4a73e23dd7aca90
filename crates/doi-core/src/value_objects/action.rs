//! Activity action tags
//!
//! Action tags follow the `{verb}_{entity}` convention (`create_member`,
//! `user_login`, `system_cleanup`). The text before the first underscore is
//! the statistics bucket of a tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Action recorded when an administrator purges old activity rows
pub const SYSTEM_CLEANUP: &str = "system_cleanup";

/// Statistics bucket for an action tag.
///
/// Everything before the first underscore; a tag without an underscore is
/// its own bucket. `create_member_batch` therefore lands in `create`.
pub fn action_prefix(action: &str) -> &str {
    action.split_once('_').map_or(action, |(prefix, _)| prefix)
}

// ============================================================================
// Entity types
// ============================================================================

/// Entities an activity row can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Member,
    Publication,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Publication => "publication",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "publication" => Ok(Self::Publication),
            other => Err(DomainError::UnknownEntityType(other.to_string())),
        }
    }
}

// ============================================================================
// Entity actions (members, publications)
// ============================================================================

/// Short action verb used by the member and publication logging helpers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityAction {
    Create,
    Update,
    Activate,
    Deactivate,
    Delete,
    /// Any verb without a canonical tag
    Other(String),
}

impl EntityAction {
    /// Parse a short verb; unknown verbs are kept verbatim
    pub fn parse(verb: &str) -> Self {
        match verb {
            "create" => Self::Create,
            "update" => Self::Update,
            "activate" => Self::Activate,
            "deactivate" => Self::Deactivate,
            "delete" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }

    /// The short verb
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
            Self::Other(verb) => verb,
        }
    }

    /// Canonical action tag: `{verb}_{entity}`, or `{entity}_{verb}` for
    /// verbs without a canonical mapping
    pub fn tag(&self, entity: EntityType) -> String {
        match self {
            Self::Other(verb) => format!("{entity}_{verb}"),
            known => format!("{}_{entity}", known.as_str()),
        }
    }

    /// Activation verb for a new `is_active` value
    pub fn for_status(is_active: bool) -> Self {
        if is_active {
            Self::Activate
        } else {
            Self::Deactivate
        }
    }
}

// ============================================================================
// Auth actions
// ============================================================================

/// Authentication event kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Logout,
    PasswordChange,
    ProfileUpdate,
    Other(String),
}

impl AuthAction {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "password_change" => Self::PasswordChange,
            "profile_update" => Self::ProfileUpdate,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::PasswordChange => "password_change",
            Self::ProfileUpdate => "profile_update",
            Self::Other(kind) => kind,
        }
    }

    /// Canonical action tag
    pub fn tag(&self) -> String {
        match self {
            Self::Login => "user_login".to_string(),
            Self::Logout => "user_logout".to_string(),
            Self::PasswordChange => "password_change".to_string(),
            Self::ProfileUpdate => "profile_update".to_string(),
            Self::Other(kind) => format!("auth_{kind}"),
        }
    }

    /// Human label: underscores become spaces, each word capitalised
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
