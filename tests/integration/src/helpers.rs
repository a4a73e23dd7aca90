//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, seeding users and making
//! HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use doi_api::{create_app, create_app_state, serve};
use doi_common::{hash_password, AppConfig};
use doi_core::{User, UserRepository, UserRole};
use doi_db::{PgPool, PgUserRepository};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_email, AuthResponse, LoginRequest, TEST_PASSWORD};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config on an ephemeral port
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("/health") {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/api/v1{}", self.base_url(), path)
        }
    }

    /// Insert a user straight into the database; there is no self sign-up
    pub async fn seed_user(&self, role: UserRole) -> Result<User> {
        let user = User::new(&unique_email("user"), "Integration Tester".to_string(), role);
        let hash = hash_password(TEST_PASSWORD)?;
        Ok(PgUserRepository::new(self.pool.clone()).create(&user, &hash).await?)
    }

    /// Seed a user of the given role and log in as them
    pub async fn login_as(&self, role: UserRole) -> Result<AuthResponse> {
        let user = self.seed_user(role).await?;
        let response = self
            .post("/auth/login", &LoginRequest::new(&user.email, TEST_PASSWORD))
            .await?;
        assert_json(response, StatusCode::OK).await
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.get(self.url(path)).bearer_auth(token)).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.url(path)).bearer_auth(token).json(body)).await
    }

    /// POST with a spoofed proxy header
    pub async fn post_forwarded<T: Serialize>(
        &self,
        path: &str,
        forwarded_for: &str,
        body: &T,
    ) -> Result<Response> {
        send(
            self.client
                .post(self.url(path))
                .header("X-Forwarded-For", forwarded_for)
                .json(body),
        )
        .await
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        send(self.client.patch(self.url(path)).bearer_auth(token).json(body)).await
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        send(self.client.put(self.url(path)).bearer_auth(token).json(body)).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.delete(self.url(path)).bearer_auth(token)).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    Ok(request.send().await?)
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}
