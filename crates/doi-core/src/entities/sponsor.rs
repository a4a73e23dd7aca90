//! Sponsor entity - the single organization on whose behalf members are managed

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::identifiers::{is_valid_crossref_member_id, is_valid_email};

/// Sponsor (singleton record)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub crossref_member_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sponsor {
    pub fn new(name: String, email: &str, crossref_member_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            email: email.trim().to_lowercase(),
            crossref_member_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError("Sponsor name is required".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(DomainError::InvalidEmail);
        }
        if !is_valid_crossref_member_id(&self.crossref_member_id) {
            return Err(DomainError::ValidationError(
                "Crossref member ID must contain only letters and digits".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let sponsor = Sponsor::new("NBS".into(), "doi@nb.rs", "1234".into());
        assert!(sponsor.validate().is_ok());

        let sponsor = Sponsor::new("NBS".into(), "doi@nb.rs", "12-34".into());
        assert!(sponsor.validate().is_err());

        let sponsor = Sponsor::new(" ".into(), "doi@nb.rs", "1234".into());
        assert!(sponsor.validate().is_err());
    }
}
