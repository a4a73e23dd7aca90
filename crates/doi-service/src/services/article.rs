//! Article service
//!
//! Article drafting and the editorial review workflow. Every status change
//! goes through `ArticleRepository::update_locked`, so the source state is
//! checked against the locked row.

use std::collections::HashMap;

use doi_core::entities::{Affiliation, Article, Author, PdfStatus};
use doi_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    AffiliationResponse, ArticleResponse, AuthorResponse, CreateAffiliationRequest,
    CreateArticleRequest, CreateAuthorRequest, UpdateArticleRequest,
};

use super::activity_logger::{ActivityLogger, NewActivity};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::request_context::RequestContext;
use super::trimmed;

/// Article service
pub struct ArticleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArticleService<'a> {
    /// Create a new ArticleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a new draft
    #[instrument(skip(self, request, body))]
    pub async fn create_article(
        &self,
        request: &RequestContext,
        body: CreateArticleRequest,
    ) -> ServiceResult<ArticleResponse> {
        let user_id = request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        if let Some(publication_id) = body.publication_id {
            self.ensure_publication(publication_id).await?;
        }

        let article = Article::new(
            body.publication_id,
            body.title.trim().to_string(),
            body.abstract_text.trim().to_string(),
            user_id,
        );
        let article = self.ctx.article_repo().create(&article).await?;

        self.log(request, user_id, "create_article", &article, None).await;
        info!(article_id = article.id, "Article created");
        Ok(article.into())
    }

    /// Get a single article
    #[instrument(skip(self))]
    pub async fn get_article(&self, article_id: i64) -> ServiceResult<ArticleResponse> {
        Ok(self.load(article_id).await?.into())
    }

    /// Edit title, abstract or publication while the article is a draft
    #[instrument(skip(self, request, body))]
    pub async fn update_article(
        &self,
        request: &RequestContext,
        article_id: i64,
        body: UpdateArticleRequest,
    ) -> ServiceResult<ArticleResponse> {
        let user_id = request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        if let Some(publication_id) = body.publication_id {
            self.ensure_publication(publication_id).await?;
        }

        let article = self
            .ctx
            .article_repo()
            .update_locked(
                article_id,
                Box::new(move |article| {
                    article.ensure_editable()?;
                    if let Some(publication_id) = body.publication_id {
                        article.publication_id = Some(publication_id);
                    }
                    if let Some(title) = body.title {
                        article.title = title.trim().to_string();
                    }
                    if let Some(abstract_text) = body.abstract_text {
                        article.abstract_text = abstract_text.trim().to_string();
                    }
                    article.updated_at = chrono::Utc::now();
                    Ok(())
                }),
            )
            .await?;

        self.log(request, user_id, "update_article", &article, None).await;
        Ok(article.into())
    }

    /// Add an author to a draft article
    #[instrument(skip(self, request, body))]
    pub async fn add_author(
        &self,
        request: &RequestContext,
        article_id: i64,
        body: CreateAuthorRequest,
    ) -> ServiceResult<AuthorResponse> {
        let user_id = request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let article = self.load(article_id).await?;
        article.ensure_editable()?;

        let order = match body.order {
            Some(order) => order,
            None => {
                let count = self.ctx.author_repo().count_by_article(article_id).await?;
                i32::try_from(count + 1).unwrap_or(i32::MAX)
            }
        };

        let mut author = Author::new(article_id, body.surname.trim().to_string());
        author.given_name = trimmed(body.given_name);
        author.suffix = trimmed(body.suffix);
        author.email = trimmed(body.email).map(|e| e.to_lowercase());
        author.orcid = trimmed(body.orcid).map(|o| o.to_uppercase());
        author.sequence = body.sequence;
        author.contributor_role = body.contributor_role;
        author.is_corresponding = body.is_corresponding;
        author.order = order;
        author.validate()?;

        let author = self.ctx.author_repo().create(&author).await?;

        ActivityLogger::new(self.ctx)
            .log_activity(
                request,
                NewActivity::new(
                    user_id,
                    "create_author",
                    format!(
                        "Added author '{}' to article '{}'",
                        author.display_name(),
                        article.title
                    ),
                ),
            )
            .await;

        Ok(author.into())
    }

    /// Authors in display order, each with its affiliations
    #[instrument(skip(self))]
    pub async fn list_authors(&self, article_id: i64) -> ServiceResult<Vec<AuthorResponse>> {
        self.load(article_id).await?;
        let authors = self.ctx.author_repo().find_by_article(article_id).await?;

        let mut by_author: HashMap<i64, Vec<AffiliationResponse>> = HashMap::new();
        for affiliation in self
            .ctx
            .author_repo()
            .find_affiliations_by_article(article_id)
            .await?
        {
            by_author
                .entry(affiliation.author_id)
                .or_default()
                .push(affiliation.into());
        }

        Ok(authors
            .into_iter()
            .map(|author| {
                let affiliations = by_author.remove(&author.id).unwrap_or_default();
                AuthorResponse {
                    affiliations,
                    ..author.into()
                }
            })
            .collect())
    }

    /// Attach an institution to an author of a draft article
    #[instrument(skip(self, request, body))]
    pub async fn add_affiliation(
        &self,
        request: &RequestContext,
        article_id: i64,
        author_id: i64,
        body: CreateAffiliationRequest,
    ) -> ServiceResult<AffiliationResponse> {
        let user_id = request.require_user()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let article = self.load(article_id).await?;
        article.ensure_editable()?;
        let author = self.load_author(article_id, author_id).await?;

        let order = match body.order {
            Some(order) => order,
            None => {
                let existing = self.ctx.author_repo().find_affiliations(author_id).await?;
                i32::try_from(existing.len() + 1).unwrap_or(i32::MAX)
            }
        };

        let mut affiliation = Affiliation::new(author_id, body.institution_name.trim().to_string());
        affiliation.institution_ror_id =
            trimmed(body.institution_ror_id).map(|r| r.to_lowercase());
        affiliation.department = trimmed(body.department);
        affiliation.order = order;
        affiliation.validate()?;

        let affiliation = self.ctx.author_repo().create_affiliation(&affiliation).await?;

        ActivityLogger::new(self.ctx)
            .log_activity(
                request,
                NewActivity::new(
                    user_id,
                    "create_affiliation",
                    format!(
                        "Added affiliation '{}' to author '{}' of article '{}'",
                        affiliation.display_name(),
                        author.display_name(),
                        article.title
                    ),
                ),
            )
            .await;

        Ok(affiliation.into())
    }

    /// Affiliations of one author in display order
    #[instrument(skip(self))]
    pub async fn list_affiliations(
        &self,
        article_id: i64,
        author_id: i64,
    ) -> ServiceResult<Vec<AffiliationResponse>> {
        self.load(article_id).await?;
        self.load_author(article_id, author_id).await?;
        let affiliations = self.ctx.author_repo().find_affiliations(author_id).await?;
        Ok(affiliations.into_iter().map(Into::into).collect())
    }

    /// Record the outcome of the uploaded file's scan
    #[instrument(skip(self, request))]
    pub async fn set_pdf_status(
        &self,
        request: &RequestContext,
        article_id: i64,
        pdf_status: PdfStatus,
    ) -> ServiceResult<ArticleResponse> {
        request.require_user()?;
        let article = self
            .ctx
            .article_repo()
            .update_locked(
                article_id,
                Box::new(move |article| {
                    article.ensure_editable()?;
                    article.pdf_status = pdf_status;
                    article.updated_at = chrono::Utc::now();
                    Ok(())
                }),
            )
            .await?;

        info!(article_id, pdf_status = pdf_status.as_str(), "PDF status recorded");
        Ok(article.into())
    }

    /// DRAFT -> REVIEW
    #[instrument(skip(self, request))]
    pub async fn submit(&self, request: &RequestContext, article_id: i64) -> ServiceResult<ArticleResponse> {
        let user_id = request.require_user()?;
        let author_count = self.ctx.author_repo().count_by_article(article_id).await?;
        let author_count = usize::try_from(author_count).unwrap_or_default();

        let article = self
            .ctx
            .article_repo()
            .update_locked(
                article_id,
                Box::new(move |article| article.submit(user_id, author_count)),
            )
            .await?;

        self.log(request, user_id, "submit_article", &article, None).await;
        info!(article_id, "Article submitted for review");
        Ok(article.into())
    }

    /// REVIEW -> READY
    #[instrument(skip(self, request))]
    pub async fn approve(&self, request: &RequestContext, article_id: i64) -> ServiceResult<ArticleResponse> {
        let reviewer_id = request.require_admin()?;
        let article = self
            .ctx
            .article_repo()
            .update_locked(article_id, Box::new(move |article| article.approve(reviewer_id)))
            .await?;

        self.log(request, reviewer_id, "approve_article", &article, None).await;
        info!(article_id, "Article approved");
        Ok(article.into())
    }

    /// REVIEW -> DRAFT with a comment for the author
    #[instrument(skip(self, request, comment))]
    pub async fn return_for_revision(
        &self,
        request: &RequestContext,
        article_id: i64,
        comment: String,
    ) -> ServiceResult<ArticleResponse> {
        let reviewer_id = request.require_admin()?;
        let article = self
            .ctx
            .article_repo()
            .update_locked(
                article_id,
                Box::new(move |article| article.return_for_revision(reviewer_id, &comment)),
            )
            .await?;

        let comment = article.revision_comment.clone();
        self.log(request, reviewer_id, "return_article", &article, comment.as_deref())
            .await;
        info!(article_id, "Article returned for revision");
        Ok(article.into())
    }

    /// READY -> PUBLISHED
    #[instrument(skip(self, request))]
    pub async fn publish(&self, request: &RequestContext, article_id: i64) -> ServiceResult<ArticleResponse> {
        let user_id = request.require_admin()?;
        let article = self
            .ctx
            .article_repo()
            .update_locked(article_id, Box::new(move |article| article.publish(user_id)))
            .await?;

        self.log(request, user_id, "publish_article", &article, None).await;
        info!(article_id, "Article published");
        Ok(article.into())
    }

    /// PUBLISHED -> WITHDRAWN with a reason
    #[instrument(skip(self, request, reason))]
    pub async fn withdraw(
        &self,
        request: &RequestContext,
        article_id: i64,
        reason: String,
    ) -> ServiceResult<ArticleResponse> {
        let user_id = request.require_admin()?;
        let article = self
            .ctx
            .article_repo()
            .update_locked(
                article_id,
                Box::new(move |article| article.withdraw(user_id, &reason)),
            )
            .await?;

        let reason = article.withdrawal_reason.clone();
        self.log(request, user_id, "withdraw_article", &article, reason.as_deref())
            .await;
        info!(article_id, "Article withdrawn");
        Ok(article.into())
    }

    async fn load(&self, article_id: i64) -> ServiceResult<Article> {
        Ok(self
            .ctx
            .article_repo()
            .find_by_id(article_id)
            .await?
            .ok_or(DomainError::ArticleNotFound(article_id))?)
    }

    /// The author, provided it belongs to `article_id`
    async fn load_author(&self, article_id: i64, author_id: i64) -> ServiceResult<Author> {
        Ok(self
            .ctx
            .author_repo()
            .find_by_id(author_id)
            .await?
            .filter(|author| author.article_id == article_id)
            .ok_or(DomainError::AuthorNotFound(author_id))?)
    }

    async fn ensure_publication(&self, publication_id: i64) -> ServiceResult<()> {
        self.ctx
            .publication_repo()
            .find_by_id(publication_id)
            .await?
            .ok_or(DomainError::PublicationNotFound(publication_id))?;
        Ok(())
    }

    async fn log(
        &self,
        request: &RequestContext,
        user_id: i64,
        action: &str,
        article: &Article,
        note: Option<&str>,
    ) {
        let description = article_description(action, article, note);
        ActivityLogger::new(self.ctx)
            .log_activity(request, NewActivity::new(user_id, action, description))
            .await;
    }
}

fn article_description(action: &str, article: &Article, note: Option<&str>) -> String {
    let title = if article.title.trim().is_empty() {
        format!("#{}", article.id)
    } else {
        format!("'{}'", article.title)
    };
    let base = match action {
        "create_article" => format!("Created article {title}"),
        "update_article" => format!("Updated article {title}"),
        "submit_article" => format!("Submitted article {title} for review"),
        "approve_article" => format!("Approved article {title}"),
        "return_article" => format!("Returned article {title} for revision"),
        "publish_article" => format!("Published article {title}"),
        "withdraw_article" => format!("Withdrew article {title}"),
        other => format!("Performed '{other}' on article {title}"),
    };
    match note {
        Some(note) => format!("{base}: {note}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestHarness};
    use doi_core::{ArticleStatus, AuthorSequence, ContributorRole};

    fn author_body(surname: &str) -> CreateAuthorRequest {
        CreateAuthorRequest {
            given_name: Some("Ana".to_string()),
            surname: surname.to_string(),
            suffix: None,
            email: None,
            orcid: Some("0000-0002-1694-233x".to_string()),
            sequence: AuthorSequence::First,
            contributor_role: ContributorRole::Author,
            is_corresponding: true,
            order: None,
        }
    }

    async fn draft(harness: &TestHarness) -> ArticleResponse {
        ArticleService::new(&harness.ctx)
            .create_article(
                &testing::operator_request(),
                CreateArticleRequest {
                    publication_id: None,
                    title: "On Lattices".to_string(),
                    abstract_text: "We study lattices.".to_string(),
                },
            )
            .await
            .unwrap()
    }

    async fn in_review(harness: &TestHarness) -> i64 {
        let service = ArticleService::new(&harness.ctx);
        let request = testing::operator_request();
        let article = draft(harness).await;
        service.add_author(&request, article.id, author_body("Petrovic")).await.unwrap();
        service
            .set_pdf_status(&request, article.id, PdfStatus::Clean)
            .await
            .unwrap();
        service.submit(&request, article.id).await.unwrap();
        article.id
    }

    #[tokio::test]
    async fn test_submit_without_authors_lists_error() {
        let harness = TestHarness::new();
        let article = draft(&harness).await;

        let err = ArticleService::new(&harness.ctx)
            .submit(&testing::operator_request(), article.id)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("At least one author is required"));
        assert!(harness.activities.with_action("submit_article").is_empty());
    }

    #[tokio::test]
    async fn test_full_workflow() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;
        let service = ArticleService::new(&harness.ctx);
        let admin = testing::admin_request();

        let approved = service.approve(&admin, id).await.unwrap();
        assert_eq!(approved.status, ArticleStatus::Ready.as_str());
        assert_eq!(approved.reviewed_by, Some(testing::ADMIN_ID));

        let published = service.publish(&admin, id).await.unwrap();
        assert_eq!(published.status, "PUBLISHED");

        let withdrawn = service
            .withdraw(&admin, id, "  duplicate publication ".to_string())
            .await
            .unwrap();
        assert_eq!(withdrawn.status, "WITHDRAWN");
        assert_eq!(withdrawn.withdrawal_reason.as_deref(), Some("duplicate publication"));

        let logged = harness.activities.with_action("withdraw_article");
        assert_eq!(
            logged[0].description,
            "Withdrew article 'On Lattices': duplicate publication"
        );
        for action in ["create_article", "submit_article", "approve_article", "publish_article"] {
            assert_eq!(harness.activities.with_action(action).len(), 1, "{action}");
        }

        let stored = harness.articles.get(id).unwrap();
        assert_eq!(stored.status, ArticleStatus::Withdrawn);
        assert_eq!(stored.published_by, Some(testing::ADMIN_ID));
        assert_eq!(stored.withdrawn_by, Some(testing::ADMIN_ID));
    }

    #[tokio::test]
    async fn test_approve_requires_review_state() {
        let harness = TestHarness::new();
        let article = draft(&harness).await;

        let err = ArticleService::new(&harness.ctx)
            .approve(&testing::admin_request(), article.id)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::ArticleNotInReview)));
    }

    #[tokio::test]
    async fn test_approve_requires_admin() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;

        let err = ArticleService::new(&harness.ctx)
            .approve(&testing::operator_request(), id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_return_requires_comment() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;
        let service = ArticleService::new(&harness.ctx);
        let admin = testing::admin_request();

        let err = service
            .return_for_revision(&admin, id, "   ".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let returned = service
            .return_for_revision(&admin, id, "Fix the figures".to_string())
            .await
            .unwrap();
        assert_eq!(returned.status, "DRAFT");
        assert_eq!(returned.submitted_by, None);
        assert_eq!(returned.revision_comment.as_deref(), Some("Fix the figures"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_approve_succeeds_once() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;

        let spawn_approve = |ctx: ServiceContext| {
            tokio::spawn(async move {
                ArticleService::new(&ctx)
                    .approve(&testing::admin_request(), id)
                    .await
            })
        };
        let first = spawn_approve(harness.ctx.clone());
        let second = spawn_approve(harness.ctx.clone());

        let results = [first.await.unwrap(), second.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(ServiceError::Domain(DomainError::ArticleNotInReview))
        )));
        assert_eq!(harness.activities.with_action("approve_article").len(), 1);
    }

    #[tokio::test]
    async fn test_locked_article_cannot_be_edited() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;

        let err = ArticleService::new(&harness.ctx)
            .update_article(
                &testing::operator_request(),
                id,
                UpdateArticleRequest {
                    title: Some("Changed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_add_author_defaults_order() {
        let harness = TestHarness::new();
        let article = draft(&harness).await;
        let service = ArticleService::new(&harness.ctx);
        let request = testing::operator_request();

        service.add_author(&request, article.id, author_body("First")).await.unwrap();
        let second = service
            .add_author(&request, article.id, author_body("Second"))
            .await
            .unwrap();
        assert_eq!(second.order, 2);
        assert_eq!(second.orcid.as_deref(), Some("0000-0002-1694-233X"));

        let authors = service.list_authors(article.id).await.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].surname, "First");

        let stored = harness.authors.all();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|a| a.article_id == article.id));
        assert_eq!(stored[1].orcid.as_deref(), Some("0000-0002-1694-233X"));
    }

    fn affiliation_body(institution: &str) -> CreateAffiliationRequest {
        CreateAffiliationRequest {
            institution_name: institution.to_string(),
            institution_ror_id: None,
            department: None,
            order: None,
        }
    }

    #[tokio::test]
    async fn test_add_affiliation_and_list_with_authors() {
        let harness = TestHarness::new();
        let article = draft(&harness).await;
        let service = ArticleService::new(&harness.ctx);
        let request = testing::operator_request();
        let author = service
            .add_author(&request, article.id, author_body("Petrovic"))
            .await
            .unwrap();

        let first = service
            .add_affiliation(
                &request,
                article.id,
                author.id,
                CreateAffiliationRequest {
                    institution_ror_id: Some(" https://ror.org/02QSMB048 ".to_string()),
                    department: Some("Faculty of Mathematics".to_string()),
                    ..affiliation_body("University of Belgrade")
                },
            )
            .await
            .unwrap();
        assert_eq!(first.order, 1);
        assert_eq!(first.institution_ror_id.as_deref(), Some("https://ror.org/02qsmb048"));
        assert_eq!(first.display_name, "Faculty of Mathematics, University of Belgrade");

        let second = service
            .add_affiliation(&request, article.id, author.id, affiliation_body("Institute of Physics"))
            .await
            .unwrap();
        assert_eq!(second.order, 2);

        let authors = service.list_authors(article.id).await.unwrap();
        let names: Vec<&str> = authors[0]
            .affiliations
            .iter()
            .map(|a| a.institution_name.as_str())
            .collect();
        assert_eq!(names, ["University of Belgrade", "Institute of Physics"]);
        assert_eq!(service.list_affiliations(article.id, author.id).await.unwrap().len(), 2);
        assert_eq!(harness.authors.all_affiliations().len(), 2);

        let logged = harness.activities.with_action("create_affiliation");
        assert_eq!(logged.len(), 2);
        assert_eq!(
            logged[0].description,
            "Added affiliation 'Faculty of Mathematics, University of Belgrade' to author 'Ana Petrovic' of article 'On Lattices'"
        );
    }

    #[tokio::test]
    async fn test_affiliation_author_must_belong_to_article() {
        let harness = TestHarness::new();
        let service = ArticleService::new(&harness.ctx);
        let request = testing::operator_request();
        let first = draft(&harness).await;
        let other = draft(&harness).await;
        let author = service
            .add_author(&request, first.id, author_body("Petrovic"))
            .await
            .unwrap();

        let err = service
            .add_affiliation(&request, other.id, author.id, affiliation_body("Elsewhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::AuthorNotFound(id)) if id == author.id));
        assert_eq!(err.status_code(), 404);

        let err = service.list_affiliations(other.id, author.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(harness.authors.all_affiliations().is_empty());
    }

    #[tokio::test]
    async fn test_affiliation_rejects_bad_ror_id() {
        let harness = TestHarness::new();
        let article = draft(&harness).await;
        let service = ArticleService::new(&harness.ctx);
        let request = testing::operator_request();
        let author = service
            .add_author(&request, article.id, author_body("Petrovic"))
            .await
            .unwrap();

        let err = service
            .add_affiliation(
                &request,
                article.id,
                author.id,
                CreateAffiliationRequest {
                    institution_ror_id: Some("02qsmb048".to_string()),
                    ..affiliation_body("University of Belgrade")
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(harness.activities.with_action("create_affiliation").is_empty());
    }

    #[tokio::test]
    async fn test_affiliations_locked_after_submission() {
        let harness = TestHarness::new();
        let id = in_review(&harness).await;
        let author_id = harness.authors.all()[0].id;

        let err = ArticleService::new(&harness.ctx)
            .add_affiliation(
                &testing::operator_request(),
                id,
                author_id,
                affiliation_body("University of Nis"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(harness.articles.get(id).unwrap().status, ArticleStatus::Review);
    }

    #[tokio::test]
    async fn test_create_article_unknown_publication() {
        let harness = TestHarness::new();
        let err = ArticleService::new(&harness.ctx)
            .create_article(
                &testing::operator_request(),
                CreateArticleRequest {
                    publication_id: Some(77),
                    title: String::new(),
                    abstract_text: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_article_description() {
        let mut article = Article::new(None, String::new(), String::new(), 1);
        article.id = 5;
        assert_eq!(
            article_description("submit_article", &article, None),
            "Submitted article #5 for review"
        );
        article.title = "T".into();
        assert_eq!(
            article_description("return_article", &article, Some("fix refs")),
            "Returned article 'T' for revision: fix refs"
        );
    }
}
