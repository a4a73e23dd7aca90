//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use doi_core::entities::User;
use doi_core::error::DomainError;
use doi_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, full_name, role, is_active, last_login, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, full_name, role, is_active, last_login, created_at, updated_at
            FROM users
            WHERE email = LOWER($1)
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = LOWER($1))
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, full_name, role, is_active, last_login, created_at, updated_at
            FROM users
            ORDER BY full_name, id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (email, password_hash, full_name, role, is_active, created_at, updated_at)
            VALUES (LOWER($1), $2, $3, $4, $5, $6, $7)
            RETURNING id, email, full_name, role, is_active, last_login, created_at, updated_at
            ",
        )
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET full_name = $2, role = $3, is_active = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
