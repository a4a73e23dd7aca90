//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, rate limiting, and timeouts.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use doi_common::{CorsConfig, RateLimitConfig};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on handler time before the client gets a 503
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the middleware stack with rate limiting and configured CORS
///
/// Request flow: RateLimit -> RequestID -> Trace -> Timeout -> CORS -> Handler
pub fn apply_middleware(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let router = router
        // CORS (innermost - applied last to outgoing responses)
        .layer(create_cors_layer(cors_config, is_production))
        // Timeout (returns 503 Service Unavailable on timeout)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ));

    // Per client address, honouring X-Forwarded-For / X-Real-IP like the audit log
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limit_config.requests_per_second.into())
        .burst_size(rate_limit_config.burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish();

    match governor_conf {
        // Rate limiting (outermost - applied first to incoming requests)
        Some(config) => router.layer(GovernorLayer {
            config: Arc::new(config),
        }),
        None => {
            tracing::warn!(
                requests_per_second = rate_limit_config.requests_per_second,
                burst = rate_limit_config.burst,
                "Rate limiting disabled: invalid configuration"
            );
            router
        }
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ]);

    if is_production || !config.allowed_origins.is_empty() {
        if config.allowed_origins.is_empty() {
            tracing::warn!(
                "CORS: No allowed origins configured in production mode. \
                 Requests from browsers will be blocked."
            );
            base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| {
                    origin.parse::<HeaderValue>().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin: {}", origin);
                        None
                    })
                })
                .collect();

            tracing::info!("CORS: Allowing {} configured origins", origins.len());
            base_layer.allow_origin(AllowOrigin::list(origins))
        }
    } else {
        tracing::warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ALLOWED_ORIGINS for production."
        );
        base_layer.allow_origin(Any)
    }
}
