//! Publication service
//!
//! Journals, book series, book sets and books owned by members.

use doi_core::entities::{Publication, PublicationType};
use doi_core::traits::PublicationQuery;
use doi_core::{DomainError, EntityAction};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreatePublicationRequest, PageRequest, PaginatedResponse, PublicationCountsResponse,
    PublicationIdentifiers, PublicationListQuery, PublicationResponse, PublicationSearchResult,
    UpdatePublicationRequest, MAX_PER_PAGE,
};

use super::activity_logger::{ActivityLogger, ActorOverride};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::{MemberService, DEFAULT_SEARCH_LIMIT, MIN_SEARCH_LENGTH};
use super::request_context::RequestContext;
use super::{apply_optional, trimmed};

/// Publication service
pub struct PublicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PublicationService<'a> {
    /// Create a new PublicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A member's publications ordered by title
    #[instrument(skip(self, query))]
    pub async fn list_publications_for_member(
        &self,
        member_id: i64,
        query: PublicationListQuery,
    ) -> ServiceResult<PaginatedResponse<PublicationResponse>> {
        MemberService::new(self.ctx).load(member_id).await?;

        let page = PageRequest::new(query.page, query.per_page);
        let filter = PublicationQuery {
            member_id: Some(member_id),
            publication_type: query.publication_type,
            is_active: query.status.as_flag(),
            search: trimmed(query.search),
            limit: page.per_page,
            offset: page.offset(),
        };

        let total = self.ctx.publication_repo().count(&filter).await?;
        let publications = self.ctx.publication_repo().find_many(&filter).await?;

        Ok(PaginatedResponse::new(publications, page.page, page.per_page, total).map(Into::into))
    }

    /// Publication counts for one member, every type present
    #[instrument(skip(self))]
    pub async fn publication_counts_by_type(
        &self,
        member_id: i64,
    ) -> ServiceResult<PublicationCountsResponse> {
        MemberService::new(self.ctx).load(member_id).await?;
        Ok(self.ctx.publication_repo().stats(Some(member_id)).await?.into())
    }

    /// Get a single publication
    #[instrument(skip(self))]
    pub async fn get_publication(&self, publication_id: i64) -> ServiceResult<PublicationResponse> {
        Ok(self.load(publication_id).await?.into())
    }

    /// Add a publication to an active member
    #[instrument(skip(self, request, body), fields(title = %body.title))]
    pub async fn create_publication(
        &self,
        request: &RequestContext,
        member_id: i64,
        body: CreatePublicationRequest,
    ) -> ServiceResult<PublicationResponse> {
        request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let member = MemberService::new(self.ctx).load(member_id).await?;
        if !member.is_active {
            return Err(DomainError::MemberInactive.into());
        }

        let mut publication =
            Publication::new(member.id, body.publication_type, body.title.trim().to_string());
        publication.subtitle = trimmed(body.subtitle);
        if let Some(code) = trimmed(body.language_code) {
            publication.language_code = code.to_lowercase();
        }
        apply_identifiers(&mut publication, body.identifiers);
        publication.clear_foreign_fields();
        publication.validate()?;

        let publication = self.ctx.publication_repo().create(&publication).await?;

        ActivityLogger::new(self.ctx)
            .log_publication_action(
                request,
                ActorOverride::NONE,
                EntityAction::Create,
                &publication,
                &[],
            )
            .await;

        info!(publication_id = publication.id, member_id, "Publication created");
        Ok(publication.into())
    }

    /// Apply the supplied fields. Changing the type drops identifiers that
    /// belong to the old type.
    #[instrument(skip(self, request, body))]
    pub async fn update_publication(
        &self,
        request: &RequestContext,
        publication_id: i64,
        body: UpdatePublicationRequest,
    ) -> ServiceResult<PublicationResponse> {
        request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let existing = self.load(publication_id).await?;
        let mut publication = existing.clone();

        if let Some(publication_type) = body.publication_type {
            publication.publication_type = publication_type;
        }
        if let Some(title) = body.title {
            publication.title = title.trim().to_string();
        }
        apply_optional(&mut publication.subtitle, body.subtitle);
        if let Some(code) = trimmed(body.language_code) {
            publication.language_code = code.to_lowercase();
        }
        apply_identifiers(&mut publication, body.identifiers);
        publication.clear_foreign_fields();
        publication.validate()?;

        let changes = existing.changed_fields(&publication);
        if !changes.is_empty() {
            publication.updated_at = chrono::Utc::now();
        }
        self.ctx.publication_repo().update(&publication).await?;

        ActivityLogger::new(self.ctx)
            .log_publication_action(
                request,
                ActorOverride::NONE,
                EntityAction::Update,
                &publication,
                &changes,
            )
            .await;

        Ok(publication.into())
    }

    /// Flip the active flag
    #[instrument(skip(self, request))]
    pub async fn toggle_publication_status(
        &self,
        request: &RequestContext,
        publication_id: i64,
    ) -> ServiceResult<PublicationResponse> {
        request.require_user()?;
        let mut publication = self.load(publication_id).await?;

        let is_active = !publication.is_active;
        publication.set_active(is_active);
        self.ctx.publication_repo().update(&publication).await?;

        ActivityLogger::new(self.ctx)
            .log_publication_action(
                request,
                ActorOverride::NONE,
                EntityAction::for_status(is_active),
                &publication,
                &[],
            )
            .await;

        Ok(publication.into())
    }

    /// Delete a publication
    #[instrument(skip(self, request))]
    pub async fn delete_publication(
        &self,
        request: &RequestContext,
        publication_id: i64,
    ) -> ServiceResult<()> {
        request.require_user()?;
        let publication = self.load(publication_id).await?;

        self.ctx.publication_repo().delete(publication_id).await?;

        ActivityLogger::new(self.ctx)
            .log_publication_action(
                request,
                ActorOverride::NONE,
                EntityAction::Delete,
                &publication,
                &[],
            )
            .await;

        info!(publication_id, "Publication deleted");
        Ok(())
    }

    /// Autocomplete over active publications by title
    #[instrument(skip(self))]
    pub async fn search_publications(
        &self,
        term: &str,
        publication_type: Option<PublicationType>,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<PublicationSearchResult>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }

        let query = PublicationQuery {
            publication_type,
            is_active: Some(true),
            search: Some(term.to_string()),
            limit: limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_PER_PAGE),
            ..Default::default()
        };
        let publications = self.ctx.publication_repo().find_many(&query).await?;
        Ok(publications.into_iter().map(Into::into).collect())
    }

    async fn load(&self, publication_id: i64) -> ServiceResult<Publication> {
        Ok(self
            .ctx
            .publication_repo()
            .find_by_id(publication_id)
            .await?
            .ok_or(DomainError::PublicationNotFound(publication_id))?)
    }
}

fn apply_identifiers(publication: &mut Publication, ids: PublicationIdentifiers) {
    apply_optional(&mut publication.journal_abbreviated_title, ids.journal_abbreviated_title);
    apply_optional(&mut publication.journal_issn, ids.journal_issn.map(|v| v.to_uppercase()));
    apply_optional(
        &mut publication.journal_electronic_issn,
        ids.journal_electronic_issn.map(|v| v.to_uppercase()),
    );
    apply_optional(&mut publication.journal_coden, ids.journal_coden);
    apply_optional(&mut publication.series_title, ids.series_title);
    apply_optional(&mut publication.series_issn, ids.series_issn.map(|v| v.to_uppercase()));
    apply_optional(
        &mut publication.series_electronic_issn,
        ids.series_electronic_issn.map(|v| v.to_uppercase()),
    );
    apply_optional(&mut publication.set_title, ids.set_title);
    apply_optional(&mut publication.set_isbn, ids.set_isbn);
    apply_optional(&mut publication.set_electronic_isbn, ids.set_electronic_isbn);
    apply_optional(&mut publication.isbn, ids.isbn);
    apply_optional(&mut publication.electronic_isbn, ids.electronic_isbn);
    apply_optional(&mut publication.edition_number, ids.edition_number);
}
