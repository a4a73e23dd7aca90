//! Author entity - a contributor attached to an article, with affiliations

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::identifiers::{is_valid_email, is_valid_orcid, is_valid_ror_id};

/// Author position in the contributor list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthorSequence {
    First,
    #[default]
    Additional,
}

impl AuthorSequence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Additional => "additional",
        }
    }
}

impl FromStr for AuthorSequence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "additional" => Ok(Self::Additional),
            other => Err(DomainError::ValidationError(format!("Unknown author sequence: {other}"))),
        }
    }
}

/// Contributor role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRole {
    #[default]
    Author,
    Editor,
    Chair,
    Translator,
    Reviewer,
}

impl ContributorRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Editor => "editor",
            Self::Chair => "chair",
            Self::Translator => "translator",
            Self::Reviewer => "reviewer",
        }
    }
}

impl FromStr for ContributorRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(Self::Author),
            "editor" => Ok(Self::Editor),
            "chair" => Ok(Self::Chair),
            "translator" => Ok(Self::Translator),
            "reviewer" => Ok(Self::Reviewer),
            other => Err(DomainError::ValidationError(format!("Unknown contributor role: {other}"))),
        }
    }
}

/// Author entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub article_id: i64,
    pub given_name: Option<String>,
    pub surname: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub sequence: AuthorSequence,
    pub contributor_role: ContributorRole,
    pub is_corresponding: bool,
    pub order: i32,
}

impl Author {
    pub fn new(article_id: i64, surname: String) -> Self {
        Self {
            id: 0,
            article_id,
            given_name: None,
            surname,
            suffix: None,
            email: None,
            orcid: None,
            sequence: AuthorSequence::default(),
            contributor_role: ContributorRole::default(),
            is_corresponding: false,
            order: 0,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.surname.trim().is_empty() {
            return Err(DomainError::ValidationError("Surname is required".into()));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_valid_email(email) {
                return Err(DomainError::InvalidEmail);
            }
        }
        if let Some(orcid) = self.orcid.as_deref().filter(|o| !o.trim().is_empty()) {
            if !is_valid_orcid(orcid) {
                return Err(DomainError::ValidationError(
                    "ORCID must have the form NNNN-NNNN-NNNN-NNNC".into(),
                ));
            }
        }
        Ok(())
    }

    /// "Given Surname Suffix", skipping missing parts
    pub fn display_name(&self) -> String {
        [
            self.given_name.as_deref(),
            Some(self.surname.as_str()),
            self.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Longest institution or department name accepted
pub const MAX_INSTITUTION_LENGTH: usize = 500;

/// Institution an author belongs to; an author may list several
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliation {
    pub id: i64,
    pub author_id: i64,
    pub institution_name: String,
    /// Canonical `https://ror.org/...` URL
    pub institution_ror_id: Option<String>,
    pub department: Option<String>,
    pub order: i32,
}

impl Affiliation {
    pub fn new(author_id: i64, institution_name: String) -> Self {
        Self {
            id: 0,
            author_id,
            institution_name,
            institution_ror_id: None,
            department: None,
            order: 0,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.institution_name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Institution name is required".into()));
        }
        if name.chars().count() > MAX_INSTITUTION_LENGTH
            || self
                .department
                .as_deref()
                .is_some_and(|d| d.chars().count() > MAX_INSTITUTION_LENGTH)
        {
            return Err(DomainError::ValidationError(format!(
                "Institution and department must be at most {MAX_INSTITUTION_LENGTH} characters"
            )));
        }
        if let Some(ror_id) = self.institution_ror_id.as_deref().filter(|r| !r.trim().is_empty()) {
            if !is_valid_ror_id(ror_id) {
                return Err(DomainError::ValidationError(
                    "ROR ID must have the form https://ror.org/0XXXXXXNN".into(),
                ));
            }
        }
        Ok(())
    }

    /// "Department, Institution" or just the institution
    pub fn display_name(&self) -> String {
        match self.department.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(department) => format!("{department}, {}", self.institution_name),
            None => self.institution_name.clone(),
        }
    }
}
