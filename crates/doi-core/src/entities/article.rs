//! Article entity - editorial workflow for a scholarly article
//!
//! ```text
//! DRAFT --submit--> REVIEW --approve--> READY --publish--> PUBLISHED --withdraw--> WITHDRAWN
//!   ^                  |
//!   +----return--------+
//! ```
//!
//! Status changes only happen through the transition methods below; there is
//! no generic status setter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Editorial status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Review,
    Ready,
    Published,
    Withdrawn,
}

impl ArticleStatus {
    pub const ALL: [ArticleStatus; 5] = [
        Self::Draft,
        Self::Review,
        Self::Ready,
        Self::Published,
        Self::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Review => "REVIEW",
            Self::Ready => "READY",
            Self::Published => "PUBLISHED",
            Self::Withdrawn => "WITHDRAWN",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown article status: {s}")))
    }
}

/// Outcome of the uploaded PDF's malware scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PdfStatus {
    #[default]
    None,
    Uploading,
    Scanning,
    Clean,
    Infected,
    ScanFailed,
}

impl PdfStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uploading => "uploading",
            Self::Scanning => "scanning",
            Self::Clean => "clean",
            Self::Infected => "infected",
            Self::ScanFailed => "scan_failed",
        }
    }
}

impl fmt::Display for PdfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PdfStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "uploading" => Ok(Self::Uploading),
            "scanning" => Ok(Self::Scanning),
            "clean" => Ok(Self::Clean),
            "infected" => Ok(Self::Infected),
            "scan_failed" => Ok(Self::ScanFailed),
            other => Err(DomainError::ValidationError(format!("Unknown PDF status: {other}"))),
        }
    }
}

/// Article entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub publication_id: Option<i64>,
    pub title: String,
    pub abstract_text: String,
    pub pdf_status: PdfStatus,
    pub status: ArticleStatus,
    pub created_by: Option<i64>,
    pub submitted_by: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub revision_comment: Option<String>,
    pub returned_by: Option<i64>,
    pub returned_at: Option<DateTime<Utc>>,
    pub published_by: Option<i64>,
    pub published_at: Option<DateTime<Utc>>,
    pub withdrawal_reason: Option<String>,
    pub withdrawn_by: Option<i64>,
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new, not yet persisted, draft article
    pub fn new(
        publication_id: Option<i64>,
        title: String,
        abstract_text: String,
        created_by: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            publication_id,
            title,
            abstract_text,
            pdf_status: PdfStatus::None,
            status: ArticleStatus::Draft,
            created_by: Some(created_by),
            submitted_by: None,
            submitted_at: None,
            reviewed_by: None,
            reviewed_at: None,
            revision_comment: None,
            returned_by: None,
            returned_at: None,
            published_by: None,
            published_at: None,
            withdrawal_reason: None,
            withdrawn_by: None,
            withdrawn_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Content edits are only allowed while drafting
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Draft {
            return Err(DomainError::ArticleLocked);
        }
        Ok(())
    }

    /// Every reason the article cannot be submitted yet; empty when ready
    pub fn submission_errors(&self, author_count: usize) -> Vec<String> {
        let mut errors = Vec::new();
        if self.status != ArticleStatus::Draft {
            errors.push("Article is not in draft status".to_string());
        }
        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.abstract_text.trim().is_empty() {
            errors.push("Abstract is required".to_string());
        }
        if author_count == 0 {
            errors.push("At least one author is required".to_string());
        }
        if self.pdf_status != PdfStatus::Clean {
            errors.push("PDF must be uploaded and scanned clean".to_string());
        }
        errors
    }

    /// DRAFT -> REVIEW
    pub fn submit(&mut self, user_id: i64, author_count: usize) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Draft {
            return Err(DomainError::ArticleNotInDraft);
        }
        let errors = self.submission_errors(author_count);
        if !errors.is_empty() {
            return Err(DomainError::SubmissionIncomplete(errors));
        }

        let now = Utc::now();
        self.status = ArticleStatus::Review;
        self.submitted_by = Some(user_id);
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// REVIEW -> READY
    pub fn approve(&mut self, reviewer_id: i64) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Review {
            return Err(DomainError::ArticleNotInReview);
        }

        let now = Utc::now();
        self.status = ArticleStatus::Ready;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(now);
        self.revision_comment = None;
        self.updated_at = now;
        Ok(())
    }

    /// REVIEW -> DRAFT with a mandatory comment
    pub fn return_for_revision(&mut self, reviewer_id: i64, comment: &str) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Review {
            return Err(DomainError::ArticleNotInReview);
        }
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DomainError::MissingRevisionComment);
        }

        let now = Utc::now();
        self.status = ArticleStatus::Draft;
        self.revision_comment = Some(comment.to_string());
        self.returned_by = Some(reviewer_id);
        self.returned_at = Some(now);
        self.submitted_by = None;
        self.submitted_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// READY -> PUBLISHED
    pub fn publish(&mut self, user_id: i64) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Ready {
            return Err(DomainError::ArticleNotReady);
        }

        let now = Utc::now();
        self.status = ArticleStatus::Published;
        self.published_by = Some(user_id);
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// PUBLISHED -> WITHDRAWN with a mandatory reason
    pub fn withdraw(&mut self, user_id: i64, reason: &str) -> Result<(), DomainError> {
        if self.status != ArticleStatus::Published {
            return Err(DomainError::ArticleNotPublished);
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::MissingWithdrawalReason);
        }

        let now = Utc::now();
        self.status = ArticleStatus::Withdrawn;
        self.withdrawal_reason = Some(reason.to_string());
        self.withdrawn_by = Some(user_id);
        self.withdrawn_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
