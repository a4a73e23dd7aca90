//! Error handling utilities for repositories

use doi_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a foreign key violation (missing parent row) to a domain error
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Escape `%`, `_` and `\` so user text matches literally inside a LIKE pattern
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
