//! Authentication service
//!
//! Handles login, token refresh, logout and the current user's own
//! profile and password. Every event is recorded in the activity log.

use doi_common::auth::{hash_password, validate_password_strength, verify_password};
use doi_common::AppError;
use doi_core::entities::{normalize_email, User};
use doi_core::{AuthAction, DomainError};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, UpdateProfileRequest,
    UserResponse,
};

use super::activity_logger::{ActivityLogger, AuthSubject};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::request_context::RequestContext;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request, body), fields(email = %body.email))]
    pub async fn login(
        &self,
        request: &RequestContext,
        body: LoginRequest,
    ) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&body.email);
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&body.password, &password_hash)? {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !user.is_active {
            warn!(user_id = user.id, "Login refused: account inactive");
            return Err(DomainError::UserInactive.into());
        }

        user.record_login();
        if let Some(at) = user.last_login {
            self.ctx.user_repo().record_login(user.id, at).await?;
        }

        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)?;

        ActivityLogger::new(self.ctx)
            .log_auth_action(request, AuthAction::Login, AuthSubject::User(&user), None)
            .await;

        info!(user_id = user.id, "User logged in");

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            UserResponse::from(&user),
        ))
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, body))]
    pub async fn refresh_tokens(&self, body: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&body.refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if !user.is_active {
            return Err(DomainError::UserInactive.into());
        }

        // Role is re-read so a demotion takes effect on the next refresh
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            UserResponse::from(&user),
        ))
    }

    /// Record a logout. Tokens are stateless and simply expire.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: &RequestContext) -> ServiceResult<()> {
        let user_id = request.require_user()?;
        let user = self.ctx.user_repo().find_by_id(user_id).await?;

        let subject = match &user {
            Some(user) => AuthSubject::User(user),
            None => AuthSubject::Id(user_id),
        };
        ActivityLogger::new(self.ctx)
            .log_auth_action(request, AuthAction::Logout, subject, None)
            .await;

        info!(user_id, "User logged out");
        Ok(())
    }

    /// The authenticated user
    #[instrument(skip(self, request))]
    pub async fn current_user(&self, request: &RequestContext) -> ServiceResult<UserResponse> {
        let user = self.load_current(request).await?;
        Ok(UserResponse::from(&user))
    }

    /// Change the current user's password after verifying the old one
    #[instrument(skip(self, request, body))]
    pub async fn change_password(
        &self,
        request: &RequestContext,
        body: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let user = self.load_current(request).await?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| ServiceError::internal("User has no password hash"))?;

        if !verify_password(&body.current_password, &current_hash)? {
            warn!(user_id = user.id, "Password change refused: wrong current password");
            return Err(ServiceError::validation("Current password is incorrect"));
        }
        validate_password_strength(&body.new_password)?;

        let new_hash = hash_password(&body.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user.id, &new_hash)
            .await?;

        ActivityLogger::new(self.ctx)
            .log_auth_action(
                request,
                AuthAction::PasswordChange,
                AuthSubject::User(&user),
                None,
            )
            .await;

        info!(user_id = user.id, "Password changed");
        Ok(())
    }

    /// Update the current user's full name
    #[instrument(skip(self, request, body))]
    pub async fn update_profile(
        &self,
        request: &RequestContext,
        body: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load_current(request).await?;

        let full_name = body.full_name.trim().to_string();
        let details = (full_name != user.full_name)
            .then(|| format!("full name changed from '{}' to '{full_name}'", user.full_name));

        user.set_full_name(full_name);
        user.validate()?;
        self.ctx.user_repo().update(&user).await?;

        ActivityLogger::new(self.ctx)
            .log_auth_action(
                request,
                AuthAction::ProfileUpdate,
                AuthSubject::User(&user),
                details.as_deref(),
            )
            .await;

        Ok(UserResponse::from(&user))
    }

    async fn load_current(&self, request: &RequestContext) -> ServiceResult<User> {
        let user_id = request.require_user()?;
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}
