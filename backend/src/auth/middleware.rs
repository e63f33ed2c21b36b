//! API key middleware
//!
//! Every `/api/v1` route requires the shared key in the `x-api-key` header.
//! A missing header is 401, a wrong key is 403.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests without a valid API key
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing API key".to_string()))?;

    if !state.api_key_matches(provided) {
        warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        return Err(ApiError::Forbidden("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}
