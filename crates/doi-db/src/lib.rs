//! # doi-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `doi-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doi_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use doi_db::repositories::PgActivityLogRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let activity_repo = PgActivityLogRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgActivityLogRepository, PgArticleRepository, PgAuthorRepository, PgMemberRepository,
    PgPublicationRepository, PgSponsorRepository, PgUserRepository,
};
