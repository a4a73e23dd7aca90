//! Axum extractors for request handling
//!
//! Custom extractors for authentication, request context, typed query
//! strings, path ids and validated bodies.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthContext, AuthUser, ClientContext, FORWARDED_FOR_HEADER, REAL_IP_HEADER};
pub use path::{EntityPath, IdPath};
pub use query::ApiQuery;
pub use validated::{ApiJson, OptionalJson, ValidatedJson};
