//! PostgreSQL implementations of ArticleRepository and AuthorRepository
//!
//! Affiliations live with their authors and are served by the author repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::{Affiliation, Article, ArticleStatus, Author};
use doi_core::error::DomainError;
use doi_core::traits::{ArticleMutation, ArticleRepository, AuthorRepository, RepoResult};

use crate::models::{AffiliationModel, ArticleModel, AuthorModel};

use super::error::{map_db_error, map_foreign_key_violation};

macro_rules! article_columns {
    () => {
        r"
        id, publication_id, title, abstract, pdf_status, status, created_by,
        submitted_by, submitted_at, reviewed_by, reviewed_at, revision_comment,
        returned_by, returned_at, published_by, published_at,
        withdrawal_reason, withdrawn_by, withdrawn_at, created_at, updated_at
        "
    };
}

macro_rules! author_columns {
    () => {
        r"
        id, article_id, given_name, surname, suffix, email, orcid, sequence,
        contributor_role, is_corresponding, author_order
        "
    };
}

macro_rules! affiliation_columns {
    () => {
        r"
        id, author_id, institution_name, institution_ror_id, department, affiliation_order
        "
    };
}

/// PostgreSQL implementation of ArticleRepository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    /// Create a new PgArticleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(concat!(
            "SELECT ",
            article_columns!(),
            " FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self, article), fields(title = %article.title))]
    async fn create(&self, article: &Article) -> RepoResult<Article> {
        let model = sqlx::query_as::<_, ArticleModel>(concat!(
            r"
            INSERT INTO articles (publication_id, title, abstract, pdf_status, status,
                                  created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING ",
            article_columns!()
        ))
        .bind(article.publication_id)
        .bind(&article.title)
        .bind(&article.abstract_text)
        .bind(article.pdf_status.as_str())
        .bind(article.status.as_str())
        .bind(article.created_by)
        .bind(article.created_at)
        .bind(article.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self, mutation))]
    async fn update_locked(&self, id: i64, mutation: ArticleMutation) -> RepoResult<Article> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked = sqlx::query_as::<_, ArticleModel>(concat!(
            "SELECT ",
            article_columns!(),
            " FROM articles WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::ArticleNotFound(id))?;

        let mut article = Article::from(locked);
        // Dropping `tx` on error rolls back and releases the lock
        mutation(&mut article)?;

        let model = sqlx::query_as::<_, ArticleModel>(concat!(
            r"
            UPDATE articles
            SET publication_id = $2, title = $3, abstract = $4, pdf_status = $5, status = $6,
                submitted_by = $7, submitted_at = $8, reviewed_by = $9, reviewed_at = $10,
                revision_comment = $11, returned_by = $12, returned_at = $13,
                published_by = $14, published_at = $15, withdrawal_reason = $16,
                withdrawn_by = $17, withdrawn_at = $18, updated_at = $19
            WHERE id = $1
            RETURNING ",
            article_columns!()
        ))
        .bind(article.id)
        .bind(article.publication_id)
        .bind(&article.title)
        .bind(&article.abstract_text)
        .bind(article.pdf_status.as_str())
        .bind(article.status.as_str())
        .bind(article.submitted_by)
        .bind(article.submitted_at)
        .bind(article.reviewed_by)
        .bind(article.reviewed_at)
        .bind(&article.revision_comment)
        .bind(article.returned_by)
        .bind(article.returned_at)
        .bind(article.published_by)
        .bind(article.published_at)
        .bind(&article.withdrawal_reason)
        .bind(article.withdrawn_by)
        .bind(article.withdrawn_at)
        .bind(article.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<Vec<(ArticleStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM articles GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ArticleStatus::ALL
            .iter()
            .map(|status| {
                let count = rows
                    .iter()
                    .find(|(name, _)| name == status.as_str())
                    .map_or(0, |(_, count)| *count);
                (*status, count)
            })
            .collect())
    }
}

/// PostgreSQL implementation of AuthorRepository
#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    /// Create a new PgAuthorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    #[instrument(skip(self))]
    async fn find_by_article(&self, article_id: i64) -> RepoResult<Vec<Author>> {
        let results = sqlx::query_as::<_, AuthorModel>(concat!(
            "SELECT ",
            author_columns!(),
            " FROM authors WHERE article_id = $1 ORDER BY author_order, id"
        ))
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Author::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_article(&self, article_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, author), fields(article_id = author.article_id))]
    async fn create(&self, author: &Author) -> RepoResult<Author> {
        let model = sqlx::query_as::<_, AuthorModel>(concat!(
            r"
            INSERT INTO authors (article_id, given_name, surname, suffix, email, orcid,
                                 sequence, contributor_role, is_corresponding, author_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING ",
            author_columns!()
        ))
        .bind(author.article_id)
        .bind(&author.given_name)
        .bind(&author.surname)
        .bind(&author.suffix)
        .bind(&author.email)
        .bind(&author.orcid)
        .bind(author.sequence.as_str())
        .bind(author.contributor_role.as_str())
        .bind(author.is_corresponding)
        .bind(author.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::ArticleNotFound(author.article_id))
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Author>> {
        let result = sqlx::query_as::<_, AuthorModel>(concat!(
            "SELECT ",
            author_columns!(),
            " FROM authors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Author::from))
    }

    #[instrument(skip(self))]
    async fn find_affiliations_by_article(&self, article_id: i64) -> RepoResult<Vec<Affiliation>> {
        let results = sqlx::query_as::<_, AffiliationModel>(
            r"
            SELECT af.id, af.author_id, af.institution_name, af.institution_ror_id,
                   af.department, af.affiliation_order
            FROM affiliations af
            JOIN authors au ON au.id = af.author_id
            WHERE au.article_id = $1
            ORDER BY af.author_id, af.affiliation_order, af.id
            ",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Affiliation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_affiliations(&self, author_id: i64) -> RepoResult<Vec<Affiliation>> {
        let results = sqlx::query_as::<_, AffiliationModel>(concat!(
            "SELECT ",
            affiliation_columns!(),
            " FROM affiliations WHERE author_id = $1 ORDER BY affiliation_order, id"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Affiliation::from).collect())
    }

    #[instrument(skip(self, affiliation), fields(author_id = affiliation.author_id))]
    async fn create_affiliation(&self, affiliation: &Affiliation) -> RepoResult<Affiliation> {
        let model = sqlx::query_as::<_, AffiliationModel>(concat!(
            r"
            INSERT INTO affiliations (author_id, institution_name, institution_ror_id,
                                      department, affiliation_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING ",
            affiliation_columns!()
        ))
        .bind(affiliation.author_id)
        .bind(&affiliation.institution_name)
        .bind(&affiliation.institution_ror_id)
        .bind(&affiliation.department)
        .bind(affiliation.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::AuthorNotFound(affiliation.author_id))
        })?;

        Ok(model.into())
    }
}
