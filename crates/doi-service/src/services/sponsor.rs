//! Sponsor service
//!
//! Reads and maintains the single sponsor record.

use doi_core::entities::Sponsor;
use doi_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{SponsorResponse, UpsertSponsorRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::request_context::RequestContext;

/// Sponsor service
pub struct SponsorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SponsorService<'a> {
    /// Create a new SponsorService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The configured sponsor
    #[instrument(skip(self))]
    pub async fn get_sponsor(&self) -> ServiceResult<SponsorResponse> {
        Ok(self.load().await?.into())
    }

    /// Create the sponsor or replace its details
    #[instrument(skip(self, request, body), fields(name = %body.name))]
    pub async fn upsert_sponsor(
        &self,
        request: &RequestContext,
        body: UpsertSponsorRequest,
    ) -> ServiceResult<SponsorResponse> {
        request.require_admin()?;

        let existing = self.ctx.sponsor_repo().get().await?;
        let mut sponsor = Sponsor::new(
            body.name.trim().to_string(),
            &body.email,
            body.crossref_member_id.trim().to_string(),
        );
        if let Some(existing) = &existing {
            sponsor.id = existing.id;
            sponsor.created_at = existing.created_at;
            sponsor.is_active = existing.is_active;
        }
        if let Some(is_active) = body.is_active {
            sponsor.is_active = is_active;
        }
        sponsor.validate()?;

        let saved = self.ctx.sponsor_repo().upsert(&sponsor).await?;
        info!(sponsor_id = saved.id, created = existing.is_none(), "Sponsor saved");
        Ok(saved.into())
    }

    pub(crate) async fn load(&self) -> ServiceResult<Sponsor> {
        Ok(self
            .ctx
            .sponsor_repo()
            .get()
            .await?
            .ok_or(DomainError::SponsorNotFound)?)
    }
}
