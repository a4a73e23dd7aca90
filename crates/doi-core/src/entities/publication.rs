//! Publication entity - a journal, book series, book set or book owned by a member

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::identifiers::{is_valid_isbn, is_valid_issn, is_valid_language_code};

/// Publication template kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationType {
    #[default]
    Journal,
    BookSeries,
    BookSet,
    Book,
}

impl PublicationType {
    pub const ALL: [PublicationType; 4] = [
        Self::Journal,
        Self::BookSeries,
        Self::BookSet,
        Self::Book,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::BookSeries => "book_series",
            Self::BookSet => "book_set",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "journal" => Ok(Self::Journal),
            "book_series" => Ok(Self::BookSeries),
            "book_set" => Ok(Self::BookSet),
            "book" => Ok(Self::Book),
            other => Err(DomainError::ValidationError(format!(
                "Unknown publication type: {other}"
            ))),
        }
    }
}

/// Default language for new publications
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Publication entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub id: i64,
    pub member_id: i64,
    pub publication_type: PublicationType,
    pub title: String,
    pub subtitle: Option<String>,
    pub language_code: String,

    // Journal
    pub journal_abbreviated_title: Option<String>,
    pub journal_issn: Option<String>,
    pub journal_electronic_issn: Option<String>,
    pub journal_coden: Option<String>,

    // Book series
    pub series_title: Option<String>,
    pub series_issn: Option<String>,
    pub series_electronic_issn: Option<String>,

    // Book set
    pub set_title: Option<String>,
    pub set_isbn: Option<String>,
    pub set_electronic_isbn: Option<String>,

    // Book
    pub isbn: Option<String>,
    pub electronic_isbn: Option<String>,
    pub edition_number: Option<String>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Publication {
    /// Create a new, not yet persisted, active publication
    pub fn new(member_id: i64, publication_type: PublicationType, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            member_id,
            publication_type,
            title,
            subtitle: None,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            journal_abbreviated_title: None,
            journal_issn: None,
            journal_electronic_issn: None,
            journal_coden: None,
            series_title: None,
            series_issn: None,
            series_electronic_issn: None,
            set_title: None,
            set_isbn: None,
            set_electronic_isbn: None,
            isbn: None,
            electronic_isbn: None,
            edition_number: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the title, language and identifier formats for the current type
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError("Title is required".into()));
        }
        if !is_valid_language_code(&self.language_code) {
            return Err(DomainError::ValidationError(
                "Language code must be a two-letter ISO 639-1 code".into(),
            ));
        }

        let issns = [
            ("journal_issn", &self.journal_issn),
            ("journal_electronic_issn", &self.journal_electronic_issn),
            ("series_issn", &self.series_issn),
            ("series_electronic_issn", &self.series_electronic_issn),
        ];
        for (field, value) in issns {
            if let Some(value) = non_empty(value) {
                if !is_valid_issn(value) {
                    return Err(DomainError::ValidationError(format!(
                        "{field}: ISSN must have the form NNNN-NNNC"
                    )));
                }
            }
        }

        let isbns = [
            ("set_isbn", &self.set_isbn),
            ("set_electronic_isbn", &self.set_electronic_isbn),
            ("isbn", &self.isbn),
            ("electronic_isbn", &self.electronic_isbn),
        ];
        for (field, value) in isbns {
            if let Some(value) = non_empty(value) {
                if !is_valid_isbn(value) {
                    return Err(DomainError::ValidationError(format!(
                        "{field}: ISBN must be a valid ISBN-10 or ISBN-13"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Clear identifier fields that do not belong to the current type
    pub fn clear_foreign_fields(&mut self) {
        if self.publication_type != PublicationType::Journal {
            self.journal_abbreviated_title = None;
            self.journal_issn = None;
            self.journal_electronic_issn = None;
            self.journal_coden = None;
        }
        if self.publication_type != PublicationType::BookSeries {
            self.series_title = None;
            self.series_issn = None;
            self.series_electronic_issn = None;
        }
        if self.publication_type != PublicationType::BookSet {
            self.set_title = None;
            self.set_isbn = None;
            self.set_electronic_isbn = None;
        }
        if self.publication_type != PublicationType::Book {
            self.isbn = None;
            self.electronic_isbn = None;
            self.edition_number = None;
        }
    }

    /// First non-empty identifier for the publication type
    pub fn primary_identifier(&self) -> Option<&str> {
        let candidates = match self.publication_type {
            PublicationType::Journal => [&self.journal_issn, &self.journal_electronic_issn],
            PublicationType::BookSeries => [&self.series_issn, &self.series_electronic_issn],
            PublicationType::BookSet => [&self.set_isbn, &self.set_electronic_isbn],
            PublicationType::Book => [&self.isbn, &self.electronic_isbn],
        };
        candidates.into_iter().find_map(non_empty)
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
    pub fn changed_fields(&self, updated: &Publication) -> Vec<&'static str> {
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
            publication_type,
            title,
            subtitle,
            language_code,
            journal_abbreviated_title,
            journal_issn,
            journal_electronic_issn,
            journal_coden,
            series_title,
            series_issn,
            series_electronic_issn,
            set_title,
            set_isbn,
            set_electronic_isbn,
            isbn,
            electronic_isbn,
            edition_number,
            is_active,
        );
        changed
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
