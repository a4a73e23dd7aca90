//! Member service
//!
//! CRUD over the sponsor's member organizations. Every change is recorded
//! through the activity logger.

use doi_core::entities::Member;
use doi_core::traits::MemberQuery;
use doi_core::{DomainError, EntityAction};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateMemberRequest, MemberListQuery, MemberResponse, MemberSearchResult, MemberStatsResponse,
    PageRequest, PaginatedResponse, UpdateMemberRequest, MAX_PER_PAGE,
};

use super::activity_logger::{ActivityLogger, ActorOverride};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::request_context::RequestContext;
use super::sponsor::SponsorService;
use super::{apply_optional, trimmed};

/// Shortest accepted autocomplete term
pub const MIN_SEARCH_LENGTH: usize = 2;
/// Default number of autocomplete results
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members ordered by name, filtered by search text and status
    #[instrument(skip(self, query))]
    pub async fn list_members(
        &self,
        query: MemberListQuery,
    ) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let page = PageRequest::new(query.page, query.per_page);
        let filter = MemberQuery {
            search: trimmed(query.search),
            is_active: query.status.as_flag(),
            limit: page.per_page,
            offset: page.offset(),
        };

        let total = self.ctx.member_repo().count(&filter).await?;
        let members = self.ctx.member_repo().find_many(&filter).await?;

        Ok(PaginatedResponse::new(members, page.page, page.per_page, total).map(Into::into))
    }

    /// Get a single member
    #[instrument(skip(self))]
    pub async fn get_member(&self, member_id: i64) -> ServiceResult<MemberResponse> {
        Ok(self.load(member_id).await?.into())
    }

    /// Register a new member under the sponsor
    #[instrument(skip(self, request, body), fields(name = %body.name))]
    pub async fn create_member(
        &self,
        request: &RequestContext,
        body: CreateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let sponsor = SponsorService::new(self.ctx).load().await?;

        let mut member = Member::new(
            sponsor.id,
            body.name.trim().to_string(),
            body.institution.trim().to_string(),
            &body.contact_email,
            body.billing_address.trim().to_string(),
            body.pib.trim().to_string(),
            body.registration_number.trim().to_string(),
        );
        member.website_url = trimmed(body.website_url);
        member.personal_id = trimmed(body.personal_id);
        member.activity_code = trimmed(body.activity_code);
        member.phone = trimmed(body.phone);
        member.contact_person = trimmed(body.contact_person);
        member.iban = trimmed(body.iban);
        member.bank_name = trimmed(body.bank_name);
        member.swift_bic = trimmed(body.swift_bic);
        member.vat_registered = body.vat_registered;
        if let Some(country) = trimmed(body.tax_country) {
            member.tax_country = country.to_uppercase();
        }
        member.validate()?;

        if self
            .ctx
            .member_repo()
            .contact_email_exists(sponsor.id, &member.contact_email, None)
            .await?
        {
            return Err(DomainError::MemberEmailExists.into());
        }

        let member = self.ctx.member_repo().create(&member).await?;

        ActivityLogger::new(self.ctx)
            .log_member_action(
                request,
                ActorOverride::NONE,
                EntityAction::Create,
                &member,
                &[],
            )
            .await;

        info!(member_id = member.id, "Member created");
        Ok(member.into())
    }

    /// Apply the supplied fields; the log entry lists what changed
    #[instrument(skip(self, request, body))]
    pub async fn update_member(
        &self,
        request: &RequestContext,
        member_id: i64,
        body: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let existing = self.load(member_id).await?;
        let mut member = existing.clone();

        if let Some(name) = body.name {
            member.name = name.trim().to_string();
        }
        if let Some(institution) = body.institution {
            member.institution = institution.trim().to_string();
        }
        if let Some(email) = body.contact_email {
            member.contact_email = email.trim().to_lowercase();
        }
        if let Some(address) = body.billing_address {
            member.billing_address = address.trim().to_string();
        }
        if let Some(pib) = body.pib {
            member.pib = pib.trim().to_string();
        }
        if let Some(number) = body.registration_number {
            member.registration_number = number.trim().to_string();
        }
        apply_optional(&mut member.website_url, body.website_url);
        apply_optional(&mut member.personal_id, body.personal_id);
        apply_optional(&mut member.activity_code, body.activity_code);
        apply_optional(&mut member.phone, body.phone);
        apply_optional(&mut member.contact_person, body.contact_person);
        apply_optional(&mut member.iban, body.iban);
        apply_optional(&mut member.bank_name, body.bank_name);
        apply_optional(&mut member.swift_bic, body.swift_bic);
        if let Some(vat_registered) = body.vat_registered {
            member.vat_registered = vat_registered;
        }
        if let Some(country) = trimmed(body.tax_country) {
            member.tax_country = country.to_uppercase();
        }
        member.validate()?;

        if member.contact_email != existing.contact_email
            && self
                .ctx
                .member_repo()
                .contact_email_exists(member.sponsor_id, &member.contact_email, Some(member.id))
                .await?
        {
            return Err(DomainError::MemberEmailExists.into());
        }

        let changes = existing.changed_fields(&member);
        if !changes.is_empty() {
            member.updated_at = chrono::Utc::now();
        }
        self.ctx.member_repo().update(&member).await?;

        ActivityLogger::new(self.ctx)
            .log_member_action(
                request,
                ActorOverride::NONE,
                EntityAction::Update,
                &member,
                &changes,
            )
            .await;

        Ok(member.into())
    }

    /// Flip the active flag
    #[instrument(skip(self, request))]
    pub async fn toggle_member_status(
        &self,
        request: &RequestContext,
        member_id: i64,
    ) -> ServiceResult<MemberResponse> {
        request.require_user()?;
        let mut member = self.load(member_id).await?;

        let is_active = !member.is_active;
        member.set_active(is_active);
        self.ctx.member_repo().update(&member).await?;

        ActivityLogger::new(self.ctx)
            .log_member_action(
                request,
                ActorOverride::NONE,
                EntityAction::for_status(is_active),
                &member,
                &[],
            )
            .await;

        info!(member_id, is_active, "Member status changed");
        Ok(member.into())
    }

    /// Delete a member together with its publications
    #[instrument(skip(self, request))]
    pub async fn delete_member(&self, request: &RequestContext, member_id: i64) -> ServiceResult<()> {
        request.require_user()?;
        let member = self.load(member_id).await?;

        self.ctx.member_repo().delete(member_id).await?;

        ActivityLogger::new(self.ctx)
            .log_member_action(
                request,
                ActorOverride::NONE,
                EntityAction::Delete,
                &member,
                &[],
            )
            .await;

        info!(member_id, "Member deleted");
        Ok(())
    }

    /// Autocomplete over active members. Terms shorter than two characters
    /// return nothing.
    #[instrument(skip(self))]
    pub async fn search_members(
        &self,
        term: &str,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<MemberSearchResult>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_PER_PAGE);

        let members = self.ctx.member_repo().search(term, limit).await?;
        Ok(members.into_iter().map(Into::into).collect())
    }

    /// Aggregate member counts
    #[instrument(skip(self))]
    pub async fn member_statistics(&self) -> ServiceResult<MemberStatsResponse> {
        Ok(self.ctx.member_repo().stats().await?.into())
    }

    pub(crate) async fn load(&self, member_id: i64) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::StatusFilter;
    use crate::services::testing::{self, TestHarness};

    fn create_body(name: &str, email: &str) -> CreateMemberRequest {
        CreateMemberRequest {
            name: name.to_string(),
            institution: format!("{name} Institute"),
            contact_email: email.to_string(),
            website_url: None,
            billing_address: "Main Street 1, Belgrade".to_string(),
            pib: "100123456".to_string(),
            registration_number: "07001234".to_string(),
            personal_id: None,
            activity_code: Some(" ".to_string()),
            phone: None,
            contact_person: None,
            iban: None,
            bank_name: None,
            swift_bic: None,
            vat_registered: false,
            tax_country: None,
        }
    }

    #[tokio::test]
    async fn test_create_member_logs_one_activity() {
        let harness = TestHarness::new();
        let member = MemberService::new(&harness.ctx)
            .create_member(
                &testing::operator_request(),
                create_body("Acme Press", "office@acme.rs"),
            )
            .await
            .unwrap();

        assert_eq!(member.tax_country, "RS");
        assert_eq!(member.activity_code, None);

        let logged = harness.activities.with_action("create_member");
        assert_eq!(logged.len(), 1);
        assert_eq!(harness.activities.all().len(), 1);
        assert_eq!(logged[0].member_id, Some(member.id));
        assert_eq!(logged[0].user_id, testing::OPERATOR_ID);
        assert!(logged[0].description.contains("Acme Press"));
        assert_eq!(
            logged[0].description,
            format!("Created member 'Acme Press' for sponsor '{}'", testing::SPONSOR_NAME)
        );
    }

    #[tokio::test]
    async fn test_create_member_survives_activity_failure() {
        let harness = TestHarness::with_failing_activity_repo();
        let member = MemberService::new(&harness.ctx)
            .create_member(
                &testing::operator_request(),
                create_body("Acme Press", "office@acme.rs"),
            )
            .await
            .unwrap();

        assert!(member.id > 0);
    }

    #[tokio::test]
    async fn test_create_member_duplicate_email() {
        let harness = TestHarness::new();
        let service = MemberService::new(&harness.ctx);
        let request = testing::operator_request();
        service
            .create_member(&request, create_body("Acme", "office@acme.rs"))
            .await
            .unwrap();

        let err = service
            .create_member(&request, create_body("Other", "Office@Acme.rs"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(harness.activities.all().len(), 1);
    }

    #[tokio::test]
    async fn test_create_member_invalid_pib() {
        let harness = TestHarness::new();
        let mut body = create_body("Acme", "office@acme.rs");
        body.pib = "12345".to_string();

        let err = MemberService::new(&harness.ctx)
            .create_member(&testing::operator_request(), body)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_create_member_requires_user() {
        let harness = TestHarness::new();
        let err = MemberService::new(&harness.ctx)
            .create_member(
                &RequestContext::new("10.0.0.1"),
                create_body("Acme", "office@acme.rs"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_update_member_lists_changed_fields() {
        let harness = TestHarness::new();
        let service = MemberService::new(&harness.ctx);
        let request = testing::operator_request();
        let member = service
            .create_member(&request, create_body("Acme", "office@acme.rs"))
            .await
            .unwrap();

        service
            .update_member(
                &request,
                member.id,
                UpdateMemberRequest {
                    name: Some("Acme Publishing".into()),
                    phone: Some("+381 11 123".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let logged = harness.activities.with_action("update_member");
        assert_eq!(
            logged[0].description,
            "Updated member 'Acme Publishing' - changed fields: name, phone"
        );
        assert_eq!(logged[0].member_id, Some(member.id));
    }

    #[tokio::test]
    async fn test_toggle_member_status() {
        let harness = TestHarness::new();
        let service = MemberService::new(&harness.ctx);
        let request = testing::operator_request();
        let member = service
            .create_member(&request, create_body("Acme", "office@acme.rs"))
            .await
            .unwrap();

        let toggled = service.toggle_member_status(&request, member.id).await.unwrap();
        assert!(!toggled.is_active);
        let toggled = service.toggle_member_status(&request, member.id).await.unwrap();
        assert!(toggled.is_active);

        assert_eq!(harness.activities.with_action("deactivate_member").len(), 1);
        assert_eq!(harness.activities.with_action("activate_member").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_member() {
        let harness = TestHarness::new();
        let service = MemberService::new(&harness.ctx);
        let request = testing::operator_request();
        let member = service
            .create_member(&request, create_body("Acme", "office@acme.rs"))
            .await
            .unwrap();

        service.delete_member(&request, member.id).await.unwrap();

        let err = service.get_member(member.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        let logged = harness.activities.with_action("delete_member");
        assert_eq!(logged[0].member_id, None);
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let harness = TestHarness::new();
        let service = MemberService::new(&harness.ctx);
        let request = testing::operator_request();
        service
            .create_member(&request, create_body("Alpha", "a@alpha.rs"))
            .await
            .unwrap();
        let beta = service
            .create_member(&request, create_body("Beta", "b@beta.rs"))
            .await
            .unwrap();
        service.toggle_member_status(&request, beta.id).await.unwrap();

        let active = service
            .list_members(MemberListQuery {
                search: None,
                status: StatusFilter::Active,
                page: 1,
                per_page: 20,
            })
            .await
            .unwrap();
        assert_eq!(active.pagination.total, 1);
        assert_eq!(active.data[0].name, "Alpha");

        assert!(service.search_members("a", None).await.unwrap().is_empty());
        let found = service.search_members("alp", None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(service.search_members("beta", None).await.unwrap().is_empty());

        let stats = service.member_statistics().await.unwrap();
        assert_eq!((stats.total, stats.active, stats.inactive), (2, 1, 1));
    }
}
