//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    activity, articles, auth, dashboard, health, members, publications, search, sponsor, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(sponsor_routes())
        .merge(member_routes())
        .merge(publication_routes())
        .merge(activity_routes())
        .merge(article_routes())
        .merge(search_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me).patch(auth::update_me))
        .route("/auth/password", post(auth::change_password))
}

/// User administration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Sponsor and dashboard routes
fn sponsor_routes() -> Router<AppState> {
    Router::new()
        .route("/sponsor", get(sponsor::get_sponsor).put(sponsor::upsert_sponsor))
        .route("/dashboard", get(dashboard::dashboard))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(members::list_members).post(members::create_member))
        .route("/members/search", get(members::search_members))
        .route("/members/stats", get(members::member_stats))
        .route(
            "/members/:id",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::delete_member),
        )
        .route("/members/:id/toggle-status", post(members::toggle_member_status))
        .route(
            "/members/:id/publications",
            get(members::list_member_publications).post(members::create_member_publication),
        )
        .route(
            "/members/:id/publications/counts",
            get(members::member_publication_counts),
        )
}

/// Publication routes
fn publication_routes() -> Router<AppState> {
    Router::new()
        .route("/publications/search", get(publications::search_publications))
        .route(
            "/publications/:id",
            get(publications::get_publication)
                .patch(publications::update_publication)
                .delete(publications::delete_publication),
        )
        .route(
            "/publications/:id/toggle-status",
            post(publications::toggle_publication_status),
        )
}

/// Activity log routes
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", get(activity::list_activities))
        .route("/activity/recent", get(activity::recent_activities))
        .route("/activity/export", post(activity::export_activities))
        .route(
            "/activity/entity/:entity_type/:entity_id",
            get(activity::entity_activities),
        )
        .route("/activity/stats", get(activity::activity_statistics))
        .route("/activity/stats/periods", get(activity::activity_period_counts))
        .route("/activity/cleanup", post(activity::cleanup_activities))
}

/// Article drafting and review routes
fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/:id",
            get(articles::get_article).patch(articles::update_article),
        )
        .route(
            "/articles/:id/authors",
            get(articles::list_authors).post(articles::add_author),
        )
        .route(
            "/articles/:id/authors/:author_id/affiliations",
            get(articles::list_affiliations).post(articles::add_affiliation),
        )
        .route("/articles/:id/pdf-status", put(articles::set_pdf_status))
        .route("/articles/:id/submit", post(articles::submit_article))
        .route("/articles/:id/approve", post(articles::approve_article))
        .route("/articles/:id/return", post(articles::return_article))
        .route("/articles/:id/publish", post(articles::publish_article))
        .route("/articles/:id/withdraw", post(articles::withdraw_article))
}

/// Unified search routes
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_all))
        .route("/search/suggestions", get(search::search_suggestions))
}
