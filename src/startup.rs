//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::application::services::{
    AccessGate, AuthService, FileService, StatusService, UserService,
};
use crate::config::Settings;
use crate::domain::{FileRepository, UserRepository};
use crate::infrastructure::cache::{self, Cache, SessionStore};
use crate::infrastructure::database::{self, DatabaseHealth};
use crate::infrastructure::repositories::{PgFileRepository, PgUserRepository};
use crate::infrastructure::storage::BlobStore;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gate: AccessGate,
    pub users: UserService,
    pub files: FileService,
    pub status: StatusService,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(
        settings: Settings,
        users: Arc<dyn UserRepository>,
        files: Arc<dyn FileRepository>,
        cache: Arc<dyn Cache>,
        db: Arc<dyn DatabaseHealth>,
    ) -> Self {
        let sessions = SessionStore::with_ttl(cache.clone(), settings.session.ttl_seconds);
        let blobs = BlobStore::new(&settings.storage.folder_path);
        let gate = AccessGate::new(users.clone(), sessions.clone());

        Self {
            auth: AuthService::new(users.clone(), sessions),
            users: UserService::new(users.clone()),
            files: FileService::new(files.clone(), blobs, gate.clone()),
            status: StatusService::new(cache, db, users, files),
            gate,
            settings: Arc::new(settings),
        }
    }
}

/// Router with all routes and the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.server.request_timeout_secs);
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        database::run_migrations(&db).await?;
        tracing::info!("Database connection pool created, migrations applied");

        // Create Redis cache
        let redis = cache::create_redis_cache(&settings.redis).await?;
        tracing::info!("Redis connection established");

        let addr = settings.server_addr();

        let state = AppState::new(
            settings,
            Arc::new(PgUserRepository::new(db.clone())),
            Arc::new(PgFileRepository::new(db.clone())),
            Arc::new(redis),
            Arc::new(db),
        );
        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
