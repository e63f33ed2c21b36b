//! Route definitions for the Motivate API
//!
//! Health probes are public. Everything under `/api/v1` requires the API key.

use crate::auth::{require_api_key, API_KEY_HEADER};
use crate::state::AppState;
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod extract;
mod health;
mod metrics;
mod user;

#[cfg(test)]
mod router_tests;

pub use metrics::metric_routes;
pub use user::user_routes;

/// Cache-Control sent with successful GET responses
pub const GET_CACHE_CONTROL: &str = "private, max-age=60";

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/metrics", metrics::metric_routes())
        .nest("/user", user::user_routes())
        .layer(middleware::from_fn(cache_get_responses))
        .layer(middleware::from_fn_with_state(state, require_api_key))
}

/// Mark successful GET responses as privately cacheable for a minute
async fn cache_get_responses(request: Request, next: Next) -> Response {
    let is_get = request.method() == Method::GET;
    let mut response = next.run(request).await;

    if is_get && response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(GET_CACHE_CONTROL));
    }
    response
}
