//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;

use doi_common::{ActivityConfig, JwtService};
use doi_core::traits::{
    ActivityLogRepository, ArticleRepository, AuthorRepository, MemberRepository,
    PublicationRepository, SponsorRepository, UserRepository,
};
use doi_db::{
    PgActivityLogRepository, PgArticleRepository, PgAuthorRepository, PgMemberRepository,
    PgPool, PgPublicationRepository, PgSponsorRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories behind their core traits
/// - JWT service for authentication
/// - Activity log retention and export settings
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    sponsor_repo: Arc<dyn SponsorRepository>,
    member_repo: Arc<dyn MemberRepository>,
    publication_repo: Arc<dyn PublicationRepository>,
    activity_repo: Arc<dyn ActivityLogRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    author_repo: Arc<dyn AuthorRepository>,

    // Services
    jwt_service: Arc<JwtService>,

    activity_config: ActivityConfig,
}

impl ServiceContext {
    /// Wire every repository to the given PostgreSQL pool
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>, activity_config: ActivityConfig) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            sponsor_repo: Arc::new(PgSponsorRepository::new(pool.clone())),
            member_repo: Arc::new(PgMemberRepository::new(pool.clone())),
            publication_repo: Arc::new(PgPublicationRepository::new(pool.clone())),
            activity_repo: Arc::new(PgActivityLogRepository::new(pool.clone())),
            article_repo: Arc::new(PgArticleRepository::new(pool.clone())),
            author_repo: Arc::new(PgAuthorRepository::new(pool)),
            jwt_service,
            activity_config,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the sponsor repository
    pub fn sponsor_repo(&self) -> &dyn SponsorRepository {
        self.sponsor_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the publication repository
    pub fn publication_repo(&self) -> &dyn PublicationRepository {
        self.publication_repo.as_ref()
    }

    /// Get the activity log repository
    pub fn activity_repo(&self) -> &dyn ActivityLogRepository {
        self.activity_repo.as_ref()
    }

    /// Get the article repository
    pub fn article_repo(&self) -> &dyn ArticleRepository {
        self.article_repo.as_ref()
    }

    /// Get the author repository
    pub fn author_repo(&self) -> &dyn AuthorRepository {
        self.author_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Activity log retention and export settings
    pub fn activity_config(&self) -> &ActivityConfig {
        &self.activity_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("activity_config", &self.activity_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    sponsor_repo: Option<Arc<dyn SponsorRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    publication_repo: Option<Arc<dyn PublicationRepository>>,
    activity_repo: Option<Arc<dyn ActivityLogRepository>>,
    article_repo: Option<Arc<dyn ArticleRepository>>,
    author_repo: Option<Arc<dyn AuthorRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    activity_config: Option<ActivityConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn sponsor_repo(mut self, repo: Arc<dyn SponsorRepository>) -> Self {
        self.sponsor_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn publication_repo(mut self, repo: Arc<dyn PublicationRepository>) -> Self {
        self.publication_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityLogRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn article_repo(mut self, repo: Arc<dyn ArticleRepository>) -> Self {
        self.article_repo = Some(repo);
        self
    }

    pub fn author_repo(mut self, repo: Arc<dyn AuthorRepository>) -> Self {
        self.author_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Defaults to [`ActivityConfig::default`] when not set
    pub fn activity_config(mut self, config: ActivityConfig) -> Self {
        self.activity_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            sponsor_repo: self
                .sponsor_repo
                .ok_or_else(|| ServiceError::validation("sponsor_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            publication_repo: self
                .publication_repo
                .ok_or_else(|| ServiceError::validation("publication_repo is required"))?,
            activity_repo: self
                .activity_repo
                .ok_or_else(|| ServiceError::validation("activity_repo is required"))?,
            article_repo: self
                .article_repo
                .ok_or_else(|| ServiceError::validation("article_repo is required"))?,
            author_repo: self
                .author_repo
                .ok_or_else(|| ServiceError::validation("author_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            activity_config: self.activity_config.unwrap_or_default(),
        })
    }
}
