//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use std::collections::BTreeMap;

use doi_core::entities::{
    ActivityRecord, Affiliation, Article, ArticleStatus, Author, Member, Publication,
    PublicationType, Sponsor, User,
};
use doi_core::traits::{MemberStats, PublicationStats};

use super::responses::{
    ActivityResponse, AffiliationResponse, ArticleResponse, AuthorResponse, MemberResponse,
    MemberSearchResult, MemberStatsResponse, PublicationCountsResponse, PublicationResponse,
    PublicationSearchResult, SponsorResponse, UserResponse,
};

// ============================================================================
// User / Sponsor Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Sponsor> for SponsorResponse {
    fn from(sponsor: Sponsor) -> Self {
        Self {
            id: sponsor.id,
            name: sponsor.name,
            email: sponsor.email,
            crossref_member_id: sponsor.crossref_member_id,
            is_active: sponsor.is_active,
            created_at: sponsor.created_at,
            updated_at: sponsor.updated_at,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            sponsor_id: member.sponsor_id,
            name: member.name,
            institution: member.institution,
            contact_email: member.contact_email,
            website_url: member.website_url,
            billing_address: member.billing_address,
            pib: member.pib,
            registration_number: member.registration_number,
            personal_id: member.personal_id,
            activity_code: member.activity_code,
            phone: member.phone,
            contact_person: member.contact_person,
            iban: member.iban,
            bank_name: member.bank_name,
            swift_bic: member.swift_bic,
            vat_registered: member.vat_registered,
            tax_country: member.tax_country,
            is_active: member.is_active,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberSearchResult {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            institution: member.institution,
        }
    }
}

impl From<MemberStats> for MemberStatsResponse {
    fn from(stats: MemberStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            inactive: stats.inactive,
            with_publications: stats.with_publications,
        }
    }
}

// ============================================================================
// Publication Mappers
// ============================================================================

impl From<Publication> for PublicationResponse {
    fn from(publication: Publication) -> Self {
        let primary_identifier = publication.primary_identifier().map(str::to_string);
        Self {
            id: publication.id,
            member_id: publication.member_id,
            publication_type: publication.publication_type.as_str().to_string(),
            title: publication.title,
            subtitle: publication.subtitle,
            language_code: publication.language_code,
            primary_identifier,
            journal_abbreviated_title: publication.journal_abbreviated_title,
            journal_issn: publication.journal_issn,
            journal_electronic_issn: publication.journal_electronic_issn,
            journal_coden: publication.journal_coden,
            series_title: publication.series_title,
            series_issn: publication.series_issn,
            series_electronic_issn: publication.series_electronic_issn,
            set_title: publication.set_title,
            set_isbn: publication.set_isbn,
            set_electronic_isbn: publication.set_electronic_isbn,
            isbn: publication.isbn,
            electronic_isbn: publication.electronic_isbn,
            edition_number: publication.edition_number,
            is_active: publication.is_active,
            created_at: publication.created_at,
            updated_at: publication.updated_at,
        }
    }
}

impl From<Publication> for PublicationSearchResult {
    fn from(publication: Publication) -> Self {
        Self {
            id: publication.id,
            member_id: publication.member_id,
            publication_type: publication.publication_type.as_str().to_string(),
            primary_identifier: publication.primary_identifier().map(str::to_string),
            title: publication.title,
        }
    }
}

impl From<PublicationStats> for PublicationCountsResponse {
    fn from(stats: PublicationStats) -> Self {
        let mut by_type: BTreeMap<String, i64> = PublicationType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        for (publication_type, count) in stats.by_type {
            by_type.insert(publication_type.as_str().to_string(), count);
        }
        Self {
            total: stats.total,
            active: stats.active,
            by_type,
        }
    }
}

// ============================================================================
// Activity Mappers
// ============================================================================

impl From<ActivityRecord> for ActivityResponse {
    fn from(record: ActivityRecord) -> Self {
        let user_name = record.user_display().to_string();
        let entry = record.entry;
        Self {
            id: entry.id.unwrap_or_default(),
            user_id: entry.user_id,
            user_name,
            action: entry.action,
            description: entry.description,
            ip_address: entry.ip_address,
            member_id: entry.member_id,
            publication_id: entry.publication_id,
            created_at: entry.created_at,
        }
    }
}

// ============================================================================
// Article Mappers
// ============================================================================

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            publication_id: article.publication_id,
            title: article.title,
            abstract_text: article.abstract_text,
            pdf_status: article.pdf_status.as_str().to_string(),
            status: article.status.as_str().to_string(),
            created_by: article.created_by,
            submitted_by: article.submitted_by,
            submitted_at: article.submitted_at,
            reviewed_by: article.reviewed_by,
            reviewed_at: article.reviewed_at,
            revision_comment: article.revision_comment,
            returned_by: article.returned_by,
            returned_at: article.returned_at,
            published_by: article.published_by,
            published_at: article.published_at,
            withdrawal_reason: article.withdrawal_reason,
            withdrawn_by: article.withdrawn_by,
            withdrawn_at: article.withdrawn_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            article_id: author.article_id,
            display_name: author.display_name(),
            given_name: author.given_name,
            surname: author.surname,
            suffix: author.suffix,
            email: author.email,
            orcid: author.orcid,
            sequence: author.sequence.as_str().to_string(),
            contributor_role: author.contributor_role.as_str().to_string(),
            is_corresponding: author.is_corresponding,
            order: author.order,
            affiliations: Vec::new(),
        }
    }
}

impl From<Affiliation> for AffiliationResponse {
    fn from(affiliation: Affiliation) -> Self {
        Self {
            id: affiliation.id,
            author_id: affiliation.author_id,
            display_name: affiliation.display_name(),
            institution_name: affiliation.institution_name,
            institution_ror_id: affiliation.institution_ror_id,
            department: affiliation.department,
            order: affiliation.order,
        }
    }
}

/// Status counts keyed by status name, every status present
pub fn article_status_counts(counts: Vec<(ArticleStatus, i64)>) -> BTreeMap<String, i64> {
    let mut by_status: BTreeMap<String, i64> = ArticleStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for (status, count) in counts {
        by_status.insert(status.as_str().to_string(), count);
    }
    by_status
}
