//! User service
//!
//! Administrator management of back-office accounts.

use doi_common::auth::{hash_password, validate_password_strength};
use doi_core::entities::User;
use doi_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateUserRequest, PageRequest, PaginatedResponse, UpdateUserRequest, UserListQuery,
    UserResponse,
};

use super::activity_logger::{ActivityLogger, NewActivity};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::request_context::RequestContext;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Users ordered by name
    #[instrument(skip(self, request))]
    pub async fn list_users(
        &self,
        request: &RequestContext,
        query: UserListQuery,
    ) -> ServiceResult<PaginatedResponse<UserResponse>> {
        request.require_admin()?;
        let page = PageRequest::new(query.page, query.per_page);

        let total = self.ctx.user_repo().count().await?;
        let users = self
            .ctx
            .user_repo()
            .list(page.per_page, page.offset())
            .await?;

        Ok(PaginatedResponse::new(users, page.page, page.per_page, total).map(UserResponse::from))
    }

    /// Get a single user
    #[instrument(skip(self, request))]
    pub async fn get_user(&self, request: &RequestContext, user_id: i64) -> ServiceResult<UserResponse> {
        request.require_admin()?;
        let user = self.load(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Create an account
    #[instrument(skip(self, request, body), fields(email = %body.email))]
    pub async fn create_user(
        &self,
        request: &RequestContext,
        body: CreateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let admin_id = request.require_admin()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_password_strength(&body.password)?;

        let user = User::new(&body.email, body.full_name.trim().to_string(), body.role);
        user.validate()?;

        if self.ctx.user_repo().email_exists(&user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&body.password)?;
        let user = self.ctx.user_repo().create(&user, &password_hash).await?;

        ActivityLogger::new(self.ctx)
            .log_activity(
                request,
                NewActivity::new(
                    admin_id,
                    "create_user",
                    format!(
                        "Created user '{}' ({}) with role {}",
                        user.full_name, user.email, user.role
                    ),
                ),
            )
            .await;

        info!(user_id = user.id, "User created");
        Ok(UserResponse::from(&user))
    }

    /// Change name, role or active flag
    #[instrument(skip(self, request, body))]
    pub async fn update_user(
        &self,
        request: &RequestContext,
        user_id: i64,
        body: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let admin_id = request.require_admin()?;
        body.validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let existing = self.load(user_id).await?;
        let mut user = existing.clone();
        if let Some(full_name) = body.full_name {
            user.set_full_name(full_name.trim().to_string());
        }
        if let Some(role) = body.role {
            user.role = role;
        }
        if let Some(is_active) = body.is_active {
            user.is_active = is_active;
        }
        user.validate()?;

        let mut changes = Vec::new();
        if user.full_name != existing.full_name {
            changes.push("full_name");
        }
        if user.role != existing.role {
            changes.push("role");
        }
        if user.is_active != existing.is_active {
            changes.push("is_active");
        }

        self.ctx.user_repo().update(&user).await?;

        let description = if changes.is_empty() {
            format!("Updated user '{}'", user.full_name)
        } else {
            format!(
                "Updated user '{}' - changed fields: {}",
                user.full_name,
                changes.join(", ")
            )
        };
        ActivityLogger::new(self.ctx)
            .log_activity(request, NewActivity::new(admin_id, "update_user", description))
            .await;

        Ok(UserResponse::from(&user))
    }

    /// Delete an account. Its activity rows go with it.
    #[instrument(skip(self, request))]
    pub async fn delete_user(&self, request: &RequestContext, user_id: i64) -> ServiceResult<()> {
        let admin_id = request.require_admin()?;
        if admin_id == user_id {
            return Err(DomainError::CannotDeleteSelf.into());
        }

        let user = self.load(user_id).await?;
        self.ctx.user_repo().delete(user_id).await?;

        ActivityLogger::new(self.ctx)
            .log_activity(
                request,
                NewActivity::new(
                    admin_id,
                    "delete_user",
                    format!("Deleted user '{}' ({})", user.full_name, user.email),
                ),
            )
            .await;

        info!(user_id, "User deleted");
        Ok(())
    }

    async fn load(&self, user_id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}
