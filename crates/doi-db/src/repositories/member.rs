//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::Member;
use doi_core::error::DomainError;
use doi_core::traits::{MemberQuery, MemberRepository, MemberStats, RepoResult};

use crate::models::{MemberModel, MemberStatsModel};

use super::error::{escape_like, map_db_error, map_unique_violation};

macro_rules! member_columns {
    () => {
        r"
        id, sponsor_id, name, institution, contact_email, website_url, billing_address,
        pib, registration_number, personal_id, activity_code, phone, contact_person,
        iban, bank_name, swift_bic, vat_registered, tax_country, is_active,
        created_at, updated_at
        "
    };
}

macro_rules! member_filter {
    () => {
        r"
        WHERE ($1::TEXT IS NULL
               OR name ILIKE '%' || $1 || '%'
               OR institution ILIKE '%' || $1 || '%'
               OR contact_email ILIKE '%' || $1 || '%')
          AND ($2::BOOLEAN IS NULL OR is_active = $2)
        "
    };
}

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(concat!(
            "SELECT ",
            member_columns!(),
            " FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &MemberQuery) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(concat!(
            "SELECT ",
            member_columns!(),
            " FROM members ",
            member_filter!(),
            " ORDER BY name, id LIMIT $3 OFFSET $4"
        ))
        .bind(query.search.as_deref().map(escape_like))
        .bind(query.is_active)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &MemberQuery) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(concat!("SELECT COUNT(*) FROM members ", member_filter!()))
            .bind(query.search.as_deref().map(escape_like))
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn contact_email_exists(
        &self,
        sponsor_id: i64,
        email: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM members
                WHERE sponsor_id = $1
                  AND contact_email = LOWER($2)
                  AND ($3::BIGINT IS NULL OR id <> $3)
            )
            ",
        )
        .bind(sponsor_id)
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(name = %member.name))]
    async fn create(&self, member: &Member) -> RepoResult<Member> {
        let model = sqlx::query_as::<_, MemberModel>(concat!(
            r"
            INSERT INTO members (
                sponsor_id, name, institution, contact_email, website_url, billing_address,
                pib, registration_number, personal_id, activity_code, phone, contact_person,
                iban, bank_name, swift_bic, vat_registered, tax_country, is_active,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, LOWER($4), $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20)
            RETURNING ",
            member_columns!()
        ))
        .bind(member.sponsor_id)
        .bind(&member.name)
        .bind(&member.institution)
        .bind(&member.contact_email)
        .bind(&member.website_url)
        .bind(&member.billing_address)
        .bind(&member.pib)
        .bind(&member.registration_number)
        .bind(&member.personal_id)
        .bind(&member.activity_code)
        .bind(&member.phone)
        .bind(&member.contact_person)
        .bind(&member.iban)
        .bind(&member.bank_name)
        .bind(&member.swift_bic)
        .bind(member.vat_registered)
        .bind(&member.tax_country)
        .bind(member.is_active)
        .bind(member.created_at)
        .bind(member.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::MemberEmailExists))?;

        Ok(model.into())
    }

    #[instrument(skip(self, member), fields(id = member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET name = $2, institution = $3, contact_email = LOWER($4), website_url = $5,
                billing_address = $6, pib = $7, registration_number = $8, personal_id = $9,
                activity_code = $10, phone = $11, contact_person = $12, iban = $13,
                bank_name = $14, swift_bic = $15, vat_registered = $16, tax_country = $17,
                is_active = $18, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(&member.institution)
        .bind(&member.contact_email)
        .bind(&member.website_url)
        .bind(&member.billing_address)
        .bind(&member.pib)
        .bind(&member.registration_number)
        .bind(&member.personal_id)
        .bind(&member.activity_code)
        .bind(&member.phone)
        .bind(&member.contact_person)
        .bind(&member.iban)
        .bind(&member.bank_name)
        .bind(&member.swift_bic)
        .bind(member.vat_registered)
        .bind(&member.tax_country)
        .bind(member.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::MemberEmailExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(concat!(
            "SELECT ",
            member_columns!(),
            r"
            FROM members
            WHERE is_active
              AND (name ILIKE '%' || $1 || '%' OR institution ILIKE '%' || $1 || '%')
            ORDER BY name, id
            LIMIT $2
            "
        ))
        .bind(escape_like(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> RepoResult<MemberStats> {
        let row = sqlx::query_as::<_, MemberStatsModel>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE m.is_active) AS active,
                   COUNT(*) FILTER (
                       WHERE EXISTS (SELECT 1 FROM publications p WHERE p.member_id = m.id)
                   ) AS with_publications
            FROM members m
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(MemberStats {
            total: row.total,
            active: row.active,
            inactive: row.total - row.active,
            with_publications: row.with_publications,
        })
    }
}
