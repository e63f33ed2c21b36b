//! Health check endpoints
//!
//! Served outside `/api/v1`, so no API key is needed:
//! - /health - process is up
//! - /health/ready - database reachable
//! - /health/live - liveness probe

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: None,
        }
    }

    fn unhealthy(message: &str) -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: Some(message.to_string()),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

fn status_only(status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    status_only("healthy")
}

/// Readiness probe, 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = match db::health_check(state.db()).await {
        Ok(_) => CheckStatus::healthy(),
        Err(_) => CheckStatus::unhealthy("database unreachable"),
    };

    let is_healthy = db_check.is_healthy();

    let response = HealthResponse {
        status: if is_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(HealthChecks { database: db_check }),
    };

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    status_only("alive")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[test]
    fn test_check_status_serialization() {
        let json = serde_json::to_value(CheckStatus::unhealthy("database unreachable")).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["message"], "database unreachable");

        let json = serde_json::to_value(CheckStatus::healthy()).unwrap();
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
