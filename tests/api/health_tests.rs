//! Status, Stats and Health API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_status_reports_both_stores() {
    let app = TestApp::new();

    let response = app.get("/status", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "redis": true, "db": true }));
}

#[tokio::test]
async fn test_status_reflects_a_down_cache() {
    let app = TestApp::new();
    app.cache.set_alive(false);

    let response = app.get("/status", None).await;

    assert_eq!(response.json(), json!({ "redis": false, "db": true }));
}

#[tokio::test]
async fn test_probes_ignore_the_session_header_during_a_cache_outage() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    app.cache.set_alive(false);

    for token in [token.as_str(), "stale-token"] {
        let response = app.get("/health/live", Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);

        let response = app.get("/status", Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json(), json!({ "redis": false, "db": true }));

        let response = app.get("/health/ready", Some(token)).await;
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json()["checks"], json!({ "redis": false, "db": true }));

        assert_eq!(app.get("/stats", Some(token)).await.status, StatusCode::OK);
        assert_eq!(app.get("/metrics", Some(token)).await.status, StatusCode::OK);
    }

    // Session-aware routes still report the outage
    assert_eq!(
        app.get("/users/me", Some("stale-token")).await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_stats_counts_users_and_files() {
    let app = TestApp::new();
    assert_eq!(
        app.get("/stats", None).await.json(),
        json!({ "users": 0, "files": 0 })
    );

    let (_, token) = app.signed_in_user().await;
    app.upload(&token, json!({ "name": "docs", "type": "folder" }))
        .await;

    assert_eq!(
        app.get("/stats", None).await.json(),
        json!({ "users": 1, "files": 1 })
    );
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_probe_fails_when_a_store_is_down() {
    let app = TestApp::new();
    assert_eq!(app.get("/health/ready", None).await.status, StatusCode::OK);

    app.db.set_alive(false);
    let response = app.get("/health/ready", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"], json!({ "redis": true, "db": false }));
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_http_counters() {
    let app = TestApp::new();
    app.get("/status", None).await;

    let response = app.get("/metrics", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let text = String::from_utf8(response.body.to_vec()).unwrap();
    assert!(text.contains("files_manager_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let response = app.get("/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({ "error": "Not found", "code": 404 }));
}
