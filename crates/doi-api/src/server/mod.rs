//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use doi_common::{AppConfig, AppError, JwtService};
use doi_db::{create_pool, run_migrations};
use doi_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = doi_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context =
        ServiceContext::postgres(pool.clone(), jwt_service, config.activity);

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    // Peer addresses feed the client-IP fallback and the rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);
    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, addr).await
}
