//! Member entity - a publisher organization registered under the sponsor

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::identifiers::{is_valid_email, is_valid_pib, is_valid_registration_number};

/// Default tax country for new members
pub const DEFAULT_TAX_COUNTRY: &str = "RS";

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub sponsor_id: i64,
    pub name: String,
    pub institution: String,
    pub contact_email: String,
    pub website_url: Option<String>,
    pub billing_address: String,
    pub pib: String,
    pub registration_number: String,
    pub personal_id: Option<String>,
    pub activity_code: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
    pub swift_bic: Option<String>,
    pub vat_registered: bool,
    pub tax_country: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new, not yet persisted, active member
    pub fn new(
        sponsor_id: i64,
        name: String,
        institution: String,
        contact_email: &str,
        billing_address: String,
        pib: String,
        registration_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            sponsor_id,
            name,
            institution,
            contact_email: contact_email.trim().to_lowercase(),
            website_url: None,
            billing_address,
            pib,
            registration_number,
            personal_id: None,
            activity_code: None,
            phone: None,
            contact_person: None,
            iban: None,
            bank_name: None,
            swift_bic: None,
            vat_registered: false,
            tax_country: DEFAULT_TAX_COUNTRY.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check required fields and identifier formats
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError("Member name is required".into()));
        }
        if self.institution.trim().is_empty() {
            return Err(DomainError::ValidationError("Institution is required".into()));
        }
        if !is_valid_email(&self.contact_email) {
            return Err(DomainError::InvalidEmail);
        }
        if self.billing_address.trim().is_empty() {
            return Err(DomainError::ValidationError("Billing address is required".into()));
        }
        if !is_valid_pib(&self.pib) {
            return Err(DomainError::ValidationError(
                "PIB must contain 9 or 12 digits".into(),
            ));
        }
        if !is_valid_registration_number(&self.registration_number) {
            return Err(DomainError::ValidationError(
                "Registration number must contain only digits".into(),
            ));
        }
        Ok(())
    }

    /// Set the active flag, returning whether it changed
    pub fn set_active(&mut self, is_active: bool) -> bool {
        if self.is_active == is_active {
            return false;
        }
        self.is_active = is_active;
        self.updated_at = Utc::now();
        true
    }

    /// Names of the editable fields that differ between `self` and `updated`
    pub fn changed_fields(&self, updated: &Member) -> Vec<&'static str> {
        let mut changed = Vec::new();
        macro_rules! diff {
            ($($field:ident),* $(,)?) => {
                $(
                    if self.$field != updated.$field {
                        changed.push(stringify!($field));
                    }
                )*
            };
        }
        diff!(
            name,
            institution,
            contact_email,
            website_url,
            billing_address,
            pib,
            registration_number,
            personal_id,
            activity_code,
            phone,
            contact_person,
            iban,
            bank_name,
            swift_bic,
            vat_registered,
            tax_country,
            is_active,
        );
        changed
    }
}
