//! Application configuration structs
//!
//! Loads configuration from environment variables (and an optional `.env` file).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub activity: ActivityConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations at startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Activity log retention and export limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ActivityConfig {
    /// Default horizon for the retention sweep
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Smallest horizon an administrator may request
    #[serde(default = "default_min_retention_days")]
    pub min_retention_days: i64,
    /// Row cap for CSV exports
    #[serde(default = "default_export_max_rows")]
    pub export_max_rows: i64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            min_retention_days: default_min_retention_days(),
            export_max_rows: default_export_max_rows(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "doi-backoffice".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_retention_days() -> i64 {
    365
}

fn default_min_retention_days() -> i64 {
    30
}

fn default_export_max_rows() -> i64 {
    10_000
}

/// Read an optional variable, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error rather than a silent default.
fn parse_var<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

fn parse_bool(name: &'static str, default: impl FnOnce() -> bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name, raw)),
        },
        Err(_) => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or a
    /// numeric value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: {
                    let raw = env::var("API_PORT").map_err(|_| ConfigError::MissingVar("API_PORT"))?;
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?
                },
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_bool("DATABASE_RUN_MIGRATIONS", default_run_migrations)?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_var("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: parse_var(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    default_refresh_token_expiry,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_var("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            activity: ActivityConfig {
                retention_days: parse_var("ACTIVITY_RETENTION_DAYS", default_retention_days)?,
                min_retention_days: parse_var(
                    "ACTIVITY_MIN_RETENTION_DAYS",
                    default_min_retention_days,
                )?,
                export_max_rows: parse_var("ACTIVITY_EXPORT_MAX_ROWS", default_export_max_rows)?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
