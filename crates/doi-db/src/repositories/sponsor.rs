//! PostgreSQL implementation of SponsorRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::Sponsor;
use doi_core::traits::{RepoResult, SponsorRepository};

use crate::models::SponsorModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SponsorRepository
#[derive(Clone)]
pub struct PgSponsorRepository {
    pool: PgPool,
}

impl PgSponsorRepository {
    /// Create a new PgSponsorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SponsorRepository for PgSponsorRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<Option<Sponsor>> {
        let result = sqlx::query_as::<_, SponsorModel>(
            r"
            SELECT id, name, email, crossref_member_id, is_active, created_at, updated_at
            FROM sponsors
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Sponsor::from))
    }

    #[instrument(skip(self))]
    async fn upsert(&self, sponsor: &Sponsor) -> RepoResult<Sponsor> {
        let model = sqlx::query_as::<_, SponsorModel>(
            r"
            INSERT INTO sponsors (name, email, crossref_member_id, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (singleton) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                crossref_member_id = EXCLUDED.crossref_member_id,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING id, name, email, crossref_member_id, is_active, created_at, updated_at
            ",
        )
        .bind(&sponsor.name)
        .bind(&sponsor.email)
        .bind(&sponsor.crossref_member_id)
        .bind(sponsor.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }
}
