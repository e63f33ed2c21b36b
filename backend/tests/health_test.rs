//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_endpoint() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ready"));
    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_metric_catalog_is_seeded() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get_json("/api/v1/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["name"].as_str())
        .collect();
    for name in ["weight", "steps", "exercise", "water", "distance", "standing", "energy"] {
        assert!(names.contains(&name), "missing {name}");
    }
    app.cleanup().await;
}
