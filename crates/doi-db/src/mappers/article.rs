//! Article, author and affiliation entity <-> model mappers

use doi_core::entities::{Affiliation, Article, Author};

use crate::models::{AffiliationModel, ArticleModel, AuthorModel};

impl From<ArticleModel> for Article {
    fn from(model: ArticleModel) -> Self {
        Article {
            id: model.id,
            publication_id: model.publication_id,
            title: model.title,
            abstract_text: model.abstract_text,
            pdf_status: model.pdf_status.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            created_by: model.created_by,
            submitted_by: model.submitted_by,
            submitted_at: model.submitted_at,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
            revision_comment: model.revision_comment,
            returned_by: model.returned_by,
            returned_at: model.returned_at,
            published_by: model.published_by,
            published_at: model.published_at,
            withdrawal_reason: model.withdrawal_reason,
            withdrawn_by: model.withdrawn_by,
            withdrawn_at: model.withdrawn_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AuthorModel> for Author {
    fn from(model: AuthorModel) -> Self {
        Author {
            id: model.id,
            article_id: model.article_id,
            given_name: model.given_name,
            surname: model.surname,
            suffix: model.suffix,
            email: model.email,
            orcid: model.orcid,
            sequence: model.sequence.parse().unwrap_or_default(),
            contributor_role: model.contributor_role.parse().unwrap_or_default(),
            is_corresponding: model.is_corresponding,
            order: model.author_order,
        }
    }
}

impl From<AffiliationModel> for Affiliation {
    fn from(model: AffiliationModel) -> Self {
        Affiliation {
            id: model.id,
            author_id: model.author_id,
            institution_name: model.institution_name,
            institution_ror_id: model.institution_ror_id,
            department: model.department,
            order: model.affiliation_order,
        }
    }
}
