//! # doi-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenType, MIN_PASSWORD_LENGTH,
};
pub use config::{
    ActivityConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig,
};
pub use error::{AppError, AppResult, Blame, Classification, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
