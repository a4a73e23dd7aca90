//! User entity - a back-office operator account

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Operator,
}

impl UserRole {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "operator" => Ok(Self::Operator),
            other => Err(DomainError::ValidationError(format!("Unknown role: {other}"))),
        }
    }
}

/// Minimum accepted full name length
pub const MIN_FULL_NAME_LENGTH: usize = 2;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet persisted, active user. The email is lowercased.
    pub fn new(email: &str, full_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: normalize_email(email),
            full_name,
            role,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Name shown in activity descriptions and exports
    pub fn display_name(&self) -> &str {
        &self.full_name
    }

    /// Validate the mutable profile fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.full_name.trim().chars().count() < MIN_FULL_NAME_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "Full name must be at least {MIN_FULL_NAME_LENGTH} characters"
            )));
        }
        if !crate::value_objects::identifiers::is_valid_email(&self.email) {
            return Err(DomainError::InvalidEmail);
        }
        Ok(())
    }

    pub fn set_full_name(&mut self, full_name: String) {
        self.full_name = full_name;
        self.updated_at = Utc::now();
    }

    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}

/// Lowercase and trim an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
