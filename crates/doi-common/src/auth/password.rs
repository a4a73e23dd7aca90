//! Password hashing and verification utilities
//!
//! Uses Argon2id with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if verification fails or the hash is invalid
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if verification fails
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a new password against the account policy
///
/// The back-office only enforces a minimum length of
/// [`MIN_PASSWORD_LENGTH`] characters.
///
/// # Errors
/// Returns a validation error if the password is too short
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    Ok(())
}
