//! API integration tests
//!
//! These tests require a running PostgreSQL instance. They are skipped when
//! DATABASE_URL or JWT_SECRET is not set.

use doi_core::UserRole;
use integration_tests::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["status"], "healthy");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.login_as(UserRole::Operator).await.expect("Login failed");
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.role, "operator");

    let response = server
        .get_auth("/auth/me", &auth.access_token)
        .await
        .expect("Request failed");
    let me: UserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.email, auth.user.email);
    assert!(me.is_active);
}

#[tokio::test]
async fn test_login_records_forwarded_ip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    let user = server.seed_user(UserRole::Operator).await.expect("Seed failed");

    let response = server
        .post_forwarded(
            "/auth/login",
            "203.0.113.7, 10.0.0.1",
            &LoginRequest::new(&user.email, TEST_PASSWORD),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::OK).await.expect("Login failed");

    let path = format!("/activity?user_id={}&action=user_login", user.id);
    let response = server
        .get_auth(&path, &admin.access_token)
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    let rows: Vec<ActivityResponse> =
        serde_json::from_value(body["data"].clone()).expect("Bad rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ip_address, "203.0.113.7");
}

#[tokio::test]
async fn test_login_invalid_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.seed_user(UserRole::Operator).await.expect("Seed failed");

    let response = server
        .post("/auth/login", &LoginRequest::new(&user.email, "WrongPassword1"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
}

#[tokio::test]
async fn test_unauthorized_access() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/auth/me").await.expect("Request failed");
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");

    let response = server
        .get_auth("/members", "not-a-token")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_create_user_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");

    let body = json!({
        "email": unique_email("new"),
        "full_name": "New Operator",
        "password": TEST_PASSWORD,
        "role": "operator",
    });

    let response = server
        .post_auth("/users", &operator.access_token, &body)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::FORBIDDEN)
        .await
        .expect("Expected 403");
    assert_eq!(code, "ADMIN_REQUIRED");

    let response = server
        .post_auth("/users", &admin.access_token, &body)
        .await
        .expect("Request failed");
    let created: UserResponse = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Create failed");
    assert_eq!(created.role, "operator");

    let response = server
        .delete_auth(&format!("/users/{}", admin.user.id), &admin.access_token)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT)
        .await
        .expect("Expected 409");
    assert_eq!(code, "CANNOT_DELETE_SELF");
}

// ============================================================================
// Member and Publication Tests
// ============================================================================

async fn ensure_sponsor(server: &TestServer, admin_token: &str) {
    let response = server
        .put_auth("/sponsor", admin_token, &sponsor_body())
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::OK)
        .await
        .expect("Sponsor upsert failed");
}

async fn create_member(server: &TestServer, token: &str) -> MemberResponse {
    let response = server
        .post_auth("/members", token, &member_body())
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("Member create failed")
}

#[tokio::test]
async fn test_create_member_logs_activity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");
    ensure_sponsor(&server, &admin.access_token).await;

    let member = create_member(&server, &operator.access_token).await;
    assert!(member.is_active);

    let path = format!("/activity/entity/member/{}", member.id);
    let response = server
        .get_auth(&path, &operator.access_token)
        .await
        .expect("Request failed");
    let rows: Vec<ActivityResponse> = assert_json(response, StatusCode::OK)
        .await
        .expect("Bad body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, "create_member");
    assert_eq!(rows[0].user_id, operator.user.id);
    assert_eq!(rows[0].member_id, Some(member.id));
    assert!(rows[0]
        .description
        .starts_with(&format!("Created member '{}'", member.name)));
}

#[tokio::test]
async fn test_create_member_rejects_invalid_pib() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    ensure_sponsor(&server, &admin.access_token).await;

    let mut body = member_body();
    body["pib"] = json!("12345");
    let response = server
        .post_auth("/members", &admin.access_token, &body)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");
}

#[tokio::test]
async fn test_unknown_entity_type() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");

    let response = server
        .get_auth("/activity/entity/issue/1", &operator.access_token)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");
    assert_eq!(code, "UNKNOWN_ENTITY_TYPE");
}

#[tokio::test]
async fn test_publication_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    ensure_sponsor(&server, &admin.access_token).await;
    let member = create_member(&server, &admin.access_token).await;

    let path = format!("/members/{}/publications", member.id);
    let response = server
        .post_auth(&path, &admin.access_token, &journal_body("Journal of Testing"))
        .await
        .expect("Request failed");
    let publication: Value = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Create failed");
    assert_eq!(publication["type"], "journal");
    assert_eq!(publication["journal_issn"], "0317-8471");
    let publication_id = publication["id"].as_i64().expect("Missing id");

    let response = server
        .post_auth(
            &format!("/publications/{publication_id}/toggle-status"),
            &admin.access_token,
            &json!({}),
        )
        .await
        .expect("Request failed");
    let toggled: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(toggled["is_active"], false);

    let response = server
        .get_auth(
            &format!("/activity/entity/publication/{publication_id}"),
            &admin.access_token,
        )
        .await
        .expect("Request failed");
    let rows: Vec<ActivityResponse> = assert_json(response, StatusCode::OK)
        .await
        .expect("Bad body");
    let actions: Vec<&str> = rows.iter().map(|row| row.action.as_str()).collect();
    assert_eq!(actions, vec!["deactivate_publication", "create_publication"]);

    let response = server
        .delete_auth(&format!("/publications/{publication_id}"), &admin.access_token)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .expect("Delete failed");
}

// ============================================================================
// Article Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_article_review_workflow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");
    let token = operator.access_token.as_str();

    let response = server
        .post_auth(
            "/articles",
            token,
            &json!({ "title": "On Testing", "abstract": "Why tests matter." }),
        )
        .await
        .expect("Request failed");
    let article: ArticleResponse = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Create failed");
    assert_eq!(article.status, "DRAFT");
    let base = format!("/articles/{}", article.id);

    // Not submittable yet: no authors, no clean PDF
    let response = server
        .post_auth(&format!("{base}/submit"), token, &json!({}))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");

    let response = server
        .post_auth(
            &format!("{base}/authors"),
            token,
            &json!({ "given_name": "Ada", "surname": "Lovelace", "sequence": "first" }),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED)
        .await
        .expect("Author add failed");

    let response = server
        .put_auth(&format!("{base}/pdf-status"), token, &json!({ "pdf_status": "clean" }))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::OK)
        .await
        .expect("PDF status failed");

    let response = server
        .post_auth(&format!("{base}/submit"), token, &json!({}))
        .await
        .expect("Request failed");
    let submitted: ArticleResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Submit failed");
    assert_eq!(submitted.status, "REVIEW");

    // Locked while in review
    let response = server
        .patch_auth(&base, token, &json!({ "title": "Changed" }))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT)
        .await
        .expect("Expected 409");
    assert_eq!(code, "ARTICLE_LOCKED");

    // Operators cannot review
    let response = server
        .post_auth(&format!("{base}/approve"), token, &json!({}))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::FORBIDDEN)
        .await
        .expect("Expected 403");

    let response = server
        .post_auth(&format!("{base}/approve"), &admin.access_token, &json!({}))
        .await
        .expect("Request failed");
    let approved: ArticleResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Approve failed");
    assert_eq!(approved.status, "READY");

    let response = server
        .post_auth(&format!("{base}/approve"), &admin.access_token, &json!({}))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT)
        .await
        .expect("Expected 409");
    assert_eq!(code, "INVALID_STATUS_TRANSITION");

    let response = server
        .post_auth(&format!("{base}/publish"), &admin.access_token, &json!({}))
        .await
        .expect("Request failed");
    let published: ArticleResponse = assert_json(response, StatusCode::OK)
        .await
        .expect("Publish failed");
    assert_eq!(published.status, "PUBLISHED");

    let response = server
        .post_auth(
            &format!("{base}/withdraw"),
            &admin.access_token,
            &json!({ "reason": "   " }),
        )
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");
    assert_eq!(code, "MISSING_WITHDRAWAL_REASON");
}

// ============================================================================
// Activity Log Tests
// ============================================================================

#[tokio::test]
async fn test_export_csv() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");

    let response = server
        .post_auth(
            "/activity/export",
            &admin.access_token,
            &json!({ "date_range": "today", "include_ip": true }),
        )
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"activity_log_"));

    let body = response.text().await.expect("Bad body");
    let header = body.lines().next().unwrap_or_default();
    assert!(header.starts_with("ID,Timestamp,User,Action,Description"));
    assert!(header.contains("IP Address"));
    assert!(body.contains("user_login"));
}

#[tokio::test]
async fn test_cleanup_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");

    let response = server
        .post_auth("/activity/cleanup", &operator.access_token, &json!({}))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::FORBIDDEN)
        .await
        .expect("Expected 403");

    let response = server
        .post_auth(
            "/activity/cleanup",
            &admin.access_token,
            &json!({ "retention_days": 7 }),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");

    // A mistyped body is a client error, never a silent default-retention purge
    let response = server
        .post_auth(
            "/activity/cleanup",
            &admin.access_token,
            &json!({ "retention_days": "60" }),
        )
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");
    assert_eq!(code, "INVALID_REQUEST_BODY");

    let response = server
        .post_auth("/activity/cleanup", &admin.access_token, &json!({}))
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["retention_days"], 365);

    let path = format!("/activity?user_id={}&action=system_cleanup", admin.user.id);
    let response = server
        .get_auth(&path, &admin.access_token)
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_activity_statistics() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");

    let path = format!("/activity/stats?user_id={}&days=7", operator.user.id);
    let response = server
        .get_auth(&path, &operator.access_token)
        .await
        .expect("Request failed");
    let stats: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(stats["period_days"], 7);
    assert_eq!(stats["total_activities"], 1);
    assert_eq!(stats["action_breakdown"]["user"], 1);

    let response = server
        .get_auth("/activity?start_date=not-a-date", &operator.access_token)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Affiliation and Search Tests
// ============================================================================

#[tokio::test]
async fn test_author_affiliations() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let operator = server.login_as(UserRole::Operator).await.expect("Login failed");
    let token = operator.access_token.as_str();

    let response = server
        .post_auth("/articles", token, &json!({ "title": "Affiliated", "abstract": "Text." }))
        .await
        .expect("Request failed");
    let article: ArticleResponse = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Create failed");
    let base = format!("/articles/{}/authors", article.id);

    let response = server
        .post_auth(&base, token, &json!({ "surname": "Tesla", "sequence": "first" }))
        .await
        .expect("Request failed");
    let author: Value = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Author add failed");
    let author_id = author["id"].as_i64().expect("Missing id");
    let path = format!("{base}/{author_id}/affiliations");

    let response = server
        .post_auth(
            &path,
            token,
            &json!({
                "institution_name": "University of Belgrade",
                "department": "Faculty of Electrical Engineering",
                "institution_ror_id": "https://ror.org/02qsmb048",
            }),
        )
        .await
        .expect("Request failed");
    let affiliation: Value = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Affiliation add failed");
    assert_eq!(affiliation["order"], 1);

    let response = server
        .post_auth(&path, token, &json!({ "institution_name": "" }))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Expected 400");

    let response = server.get_auth(&base, token).await.expect("Request failed");
    let authors: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(
        authors[0]["affiliations"][0]["display_name"],
        "Faculty of Electrical Engineering, University of Belgrade"
    );

    let response = server
        .get_auth(&format!("/articles/{}/authors/999999999/affiliations", article.id), token)
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND)
        .await
        .expect("Expected 404");
    assert_eq!(code, "UNKNOWN_AUTHOR");
}

#[tokio::test]
async fn test_unified_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.login_as(UserRole::Admin).await.expect("Login failed");
    ensure_sponsor(&server, &admin.access_token).await;
    let member = create_member(&server, &admin.access_token).await;

    let title = format!("Zephyr {}", unique_suffix());
    let response = server
        .post_auth(
            &format!("/members/{}/publications", member.id),
            &admin.access_token,
            &journal_body(&title),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED)
        .await
        .expect("Create failed");

    let response = server
        .get_auth(&format!("/search?q={title}"), &admin.access_token)
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(body["publications_count"].as_i64().unwrap_or_default() >= 1);
    assert_eq!(body["results"][0]["type"], "publication");
    assert_eq!(body["results"][0]["title"], title.as_str());

    let response = server
        .get_auth(&format!("/search?q={}&scope=members", member.name), &admin.access_token)
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["publications_count"], 0);
    assert_eq!(body["results"][0]["id"], member.id);

    let response = server
        .get_auth(&format!("/search/suggestions?q={title}"), &admin.access_token)
        .await
        .expect("Request failed");
    let suggestions: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(suggestions[0]["text"], title.as_str());

    let response = server
        .get("/search?q=zephyr")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Expected 401");
}
