//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Password of every seeded user
pub const TEST_PASSWORD: &str = "Integration1";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix across parallel tests and repeated runs
pub fn unique_suffix() -> String {
    format!("{}{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}{}@example.com", unique_suffix())
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
}

/// Member response (subset)
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub contact_email: String,
    pub is_active: bool,
}

/// Article response (subset)
#[derive(Debug, Deserialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub status: String,
    pub revision_comment: Option<String>,
}

/// Activity response (subset)
#[derive(Debug, Deserialize)]
pub struct ActivityResponse {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub ip_address: String,
    pub member_id: Option<i64>,
}

/// Sponsor body used to make member creation possible
pub fn sponsor_body() -> Value {
    json!({
        "name": "Integration Sponsor",
        "email": "sponsor@example.com",
        "crossref_member_id": "12345",
    })
}

/// A valid member with a unique contact email
pub fn member_body() -> Value {
    let suffix = unique_suffix();
    json!({
        "name": format!("Member {suffix}"),
        "institution": "Institute of Testing",
        "contact_email": unique_email("member"),
        "billing_address": "Knez Mihailova 1, Belgrade",
        "pib": "100123456",
        "registration_number": "07001234",
    })
}

pub fn journal_body(title: &str) -> Value {
    json!({
        "type": "journal",
        "title": title,
        "journal_issn": "0317-8471",
    })
}
