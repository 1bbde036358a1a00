//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use fake::{faker::internet::en::SafeEmail, Fake};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use files_manager::config::Settings;
use files_manager::infrastructure::cache::MemoryCache;
use files_manager::infrastructure::repositories::{
    InMemoryFileRepository, InMemoryUserRepository, StaticHealth,
};
use files_manager::startup::{build_router, AppState};

pub const PASSWORD: &str = "toto1234!";

/// Response with its body fully read
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Router over in-memory stores and a temporary blob directory
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<MemoryCache>,
    pub db: Arc<StaticHealth>,
    pub blobs: TempDir,
}

impl TestApp {
    /// Create a new test application with in-memory dependencies
    pub fn new() -> Self {
        let blobs = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.storage.folder_path = blobs.path().join("files").to_string_lossy().into_owned();

        let cache = Arc::new(MemoryCache::new());
        let db = Arc::new(StaticHealth::new(true));
        let state = AppState::new(
            settings,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryFileRepository::new()),
            cache.clone(),
            db.clone(),
        );

        Self {
            router: build_router(state),
            cache,
            db,
            blobs,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Make a GET request, with a session token when given
    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        match token {
            Some(token) => {
                self.request(Method::GET, uri, &[("X-Token", token)], None)
                    .await
            }
            None => self.request(Method::GET, uri, &[], None).await,
        }
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        match token {
            Some(token) => {
                self.request(Method::POST, uri, &[("X-Token", token)], Some(body))
                    .await
            }
            None => self.request(Method::POST, uri, &[], Some(body)).await,
        }
    }

    /// Make an authenticated PUT request
    pub async fn put(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::PUT, uri, &[("X-Token", token)], None)
            .await
    }

    /// `GET /connect` with Basic credentials
    pub async fn connect(&self, email: &str, password: &str) -> TestResponse {
        let credentials = basic_auth(email, password);
        self.request(
            Method::GET,
            "/connect",
            &[("Authorization", credentials.as_str())],
            None,
        )
        .await
    }

    /// Register a fresh user and sign in; returns `(email, token)`
    pub async fn signed_in_user(&self) -> (String, String) {
        let email = format!("{}.{}", uuid::Uuid::new_v4().simple(), SafeEmail().fake::<String>());
        let response = self
            .post_json(
                "/users",
                serde_json::json!({ "email": email, "password": PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        let response = self.connect(&email, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK);
        let token = response.json()["token"].as_str().unwrap().to_string();

        (email, token)
    }

    /// Upload an entry and return the response body
    pub async fn upload(&self, token: &str, body: Value) -> Value {
        let response = self.post_json("/files", body, Some(token)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.json()
    }
}

pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
}

pub fn b64(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}
