//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.

use chrono::{Duration, Utc};
use doi_core::UserRole;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Role at the time the token was issued
    pub role: UserRole,
}

impl Claims {
    /// Get the numeric user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not an integer
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if this is an access token
    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }

    /// Check if this is a refresh token
    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry times
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Generate a token pair for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_token_pair(&self, user_id: i64, role: UserRole) -> Result<TokenPair, AppError> {
        let access_token = self.encode_token(user_id, role, TokenType::Access)?;
        let refresh_token = self.encode_token(user_id, role, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Encode a JWT token
    fn encode_token(
        &self,
        user_id: i64,
        role: UserRole,
        token_type: TokenType,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type,
            role,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if !claims.is_access_token() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Validate a refresh token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if !claims.is_refresh_token() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
