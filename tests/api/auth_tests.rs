//! Authentication and User API Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{TestApp, PASSWORD};

#[tokio::test]
async fn test_register_returns_id_and_email() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/users",
            json!({ "email": "bob@dylan.com", "password": PASSWORD }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["email"], "bob@dylan.com");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_validation_messages() {
    let app = TestApp::new();

    let cases = [
        (json!({}), "Missing email"),
        (json!({ "password": PASSWORD }), "Missing email"),
        (json!({ "email": "bob@dylan.com" }), "Missing password"),
        (json!({ "email": "bob@dylan.com", "password": "" }), "Missing password"),
    ];

    for (body, expected) in cases {
        let response = app.post_json("/users", body, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": expected, "code": 400 }));
    }
}

#[tokio::test]
async fn test_register_twice_fails() {
    let app = TestApp::new();
    let body = json!({ "email": "bob@dylan.com", "password": PASSWORD });

    app.post_json("/users", body.clone(), None).await;
    let response = app.post_json("/users", body, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Already exist");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/users",
            &[("Content-Type", "application/json")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 400);
}

#[tokio::test]
async fn test_connect_issues_distinct_tokens() {
    let app = TestApp::new();
    let (email, first) = app.signed_in_user().await;

    let response = app.connect(&email, PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
    let second = response.json()["token"].as_str().unwrap().to_string();

    assert_ne!(first, second);
    assert_eq!(first.len(), 43);
    // Both sessions stay valid
    assert_eq!(app.get("/users/me", Some(&first)).await.status, StatusCode::OK);
    assert_eq!(app.get("/users/me", Some(&second)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_connect_rejects_bad_credentials() {
    let app = TestApp::new();
    let (email, _) = app.signed_in_user().await;

    let wrong_password = app.connect(&email, "toto1234").await;
    let unknown_user = app.connect("nobody@dylan.com", PASSWORD).await;
    let no_header = app.get("/connect", None).await;
    let not_basic = app
        .request(
            Method::GET,
            "/connect",
            &[("Authorization", "Bearer abc")],
            None,
        )
        .await;

    for response in [wrong_password, unknown_user, no_header, not_basic] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json(),
            json!({ "error": "Unauthorized", "code": 401 })
        );
    }
}

#[tokio::test]
async fn test_me_requires_a_session() {
    let app = TestApp::new();
    let (email, token) = app.signed_in_user().await;

    let response = app.get("/users/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["email"], email.as_str());

    assert_eq!(
        app.get("/users/me", None).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/users/me", Some("bogus")).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_disconnect_revokes_the_session() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;

    let response = app.get("/disconnect", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    assert_eq!(
        app.get("/users/me", Some(&token)).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/disconnect", Some(&token)).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/disconnect", None).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_cache_outage_is_service_unavailable() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    app.cache.set_alive(false);

    let response = app.get("/users/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["code"], 503);
}
