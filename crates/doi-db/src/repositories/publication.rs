//! PostgreSQL implementation of PublicationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::{Publication, PublicationType};
use doi_core::error::DomainError;
use doi_core::traits::{PublicationQuery, PublicationRepository, PublicationStats, RepoResult};

use crate::models::{PublicationModel, PublicationTypeCountModel};

use super::error::{escape_like, map_db_error, map_foreign_key_violation};

macro_rules! publication_columns {
    () => {
        r"
        id, member_id, publication_type, title, subtitle, language_code,
        journal_abbreviated_title, journal_issn, journal_electronic_issn, journal_coden,
        series_title, series_issn, series_electronic_issn,
        set_title, set_isbn, set_electronic_isbn,
        isbn, electronic_isbn, edition_number,
        is_active, created_at, updated_at
        "
    };
}

macro_rules! publication_filter {
    () => {
        r"
        WHERE ($1::BIGINT IS NULL OR member_id = $1)
          AND ($2::TEXT IS NULL OR publication_type = $2)
          AND ($3::BOOLEAN IS NULL OR is_active = $3)
          AND ($4::TEXT IS NULL
               OR title ILIKE '%' || $4 || '%'
               OR subtitle ILIKE '%' || $4 || '%')
        "
    };
}

/// PostgreSQL implementation of PublicationRepository
#[derive(Clone)]
pub struct PgPublicationRepository {
    pool: PgPool,
}

impl PgPublicationRepository {
    /// Create a new PgPublicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublicationRepository for PgPublicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Publication>> {
        let result = sqlx::query_as::<_, PublicationModel>(concat!(
            "SELECT ",
            publication_columns!(),
            " FROM publications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Publication::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>> {
        let results = sqlx::query_as::<_, PublicationModel>(concat!(
            "SELECT ",
            publication_columns!(),
            " FROM publications ",
            publication_filter!(),
            " ORDER BY title, id LIMIT $5 OFFSET $6"
        ))
        .bind(query.member_id)
        .bind(query.publication_type.map(PublicationType::as_str))
        .bind(query.is_active)
        .bind(query.search.as_deref().map(escape_like))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Publication::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &PublicationQuery) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(concat!(
            "SELECT COUNT(*) FROM publications ",
            publication_filter!()
        ))
        .bind(query.member_id)
        .bind(query.publication_type.map(PublicationType::as_str))
        .bind(query.is_active)
        .bind(query.search.as_deref().map(escape_like))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, publication), fields(title = %publication.title))]
    async fn create(&self, publication: &Publication) -> RepoResult<Publication> {
        let model = sqlx::query_as::<_, PublicationModel>(concat!(
            r"
            INSERT INTO publications (
                member_id, publication_type, title, subtitle, language_code,
                journal_abbreviated_title, journal_issn, journal_electronic_issn, journal_coden,
                series_title, series_issn, series_electronic_issn,
                set_title, set_isbn, set_electronic_isbn,
                isbn, electronic_isbn, edition_number,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21)
            RETURNING ",
            publication_columns!()
        ))
        .bind(publication.member_id)
        .bind(publication.publication_type.as_str())
        .bind(&publication.title)
        .bind(&publication.subtitle)
        .bind(&publication.language_code)
        .bind(&publication.journal_abbreviated_title)
        .bind(&publication.journal_issn)
        .bind(&publication.journal_electronic_issn)
        .bind(&publication.journal_coden)
        .bind(&publication.series_title)
        .bind(&publication.series_issn)
        .bind(&publication.series_electronic_issn)
        .bind(&publication.set_title)
        .bind(&publication.set_isbn)
        .bind(&publication.set_electronic_isbn)
        .bind(&publication.isbn)
        .bind(&publication.electronic_isbn)
        .bind(&publication.edition_number)
        .bind(publication.is_active)
        .bind(publication.created_at)
        .bind(publication.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::MemberNotFound(publication.member_id))
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self, publication), fields(id = publication.id))]
    async fn update(&self, publication: &Publication) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE publications
            SET publication_type = $2, title = $3, subtitle = $4, language_code = $5,
                journal_abbreviated_title = $6, journal_issn = $7, journal_electronic_issn = $8,
                journal_coden = $9, series_title = $10, series_issn = $11,
                series_electronic_issn = $12, set_title = $13, set_isbn = $14,
                set_electronic_isbn = $15, isbn = $16, electronic_isbn = $17,
                edition_number = $18, is_active = $19, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(publication.id)
        .bind(publication.publication_type.as_str())
        .bind(&publication.title)
        .bind(&publication.subtitle)
        .bind(&publication.language_code)
        .bind(&publication.journal_abbreviated_title)
        .bind(&publication.journal_issn)
        .bind(&publication.journal_electronic_issn)
        .bind(&publication.journal_coden)
        .bind(&publication.series_title)
        .bind(&publication.series_issn)
        .bind(&publication.series_electronic_issn)
        .bind(&publication.set_title)
        .bind(&publication.set_isbn)
        .bind(&publication.set_electronic_isbn)
        .bind(&publication.isbn)
        .bind(&publication.electronic_isbn)
        .bind(&publication.edition_number)
        .bind(publication.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PublicationNotFound(publication.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PublicationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats(&self, member_id: Option<i64>) -> RepoResult<PublicationStats> {
        let rows = sqlx::query_as::<_, PublicationTypeCountModel>(
            r"
            SELECT publication_type,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_active) AS active
            FROM publications
            WHERE ($1::BIGINT IS NULL OR member_id = $1)
            GROUP BY publication_type
            ",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Report every type, including those with no rows
        let mut stats = PublicationStats {
            total: 0,
            active: 0,
            by_type: PublicationType::ALL.iter().map(|t| (*t, 0)).collect(),
        };
        for row in rows {
            stats.total += row.total;
            stats.active += row.active;
            if let Ok(kind) = row.publication_type.parse::<PublicationType>() {
                if let Some(slot) = stats.by_type.iter_mut().find(|(t, _)| *t == kind) {
                    slot.1 = row.total;
                }
            }
        }

        Ok(stats)
    }
}
