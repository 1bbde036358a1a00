//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port, request timeout)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL document store)
    pub database: DatabaseSettings,

    /// Redis configuration (session cache)
    pub redis: RedisSettings,

    /// Blob storage configuration
    pub storage: StorageSettings,

    /// Session lifetime
    pub session: SessionSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Log output
    pub log: LogSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    /// Upper bound on the handling time of one request, store calls included
    pub request_timeout_secs: u64,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,
}

/// Where blobs are written.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Base directory, created on first upload
    pub folder_path: String,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Token lifetime in seconds (default: 86400)
    pub ttl_seconds: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; empty allows any
    pub allowed_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. `APP__*` environment variables
    /// 5. Plain variables: PORT, DATABASE_URL (or DB_HOST/DB_PORT/DB_DATABASE),
    ///    REDIS_URL, FOLDER_PATH
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("database.url", "postgres://localhost:5432/files_manager")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout", 5)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("storage.folder_path", "/tmp/files_manager")?
            .set_default("session.ttl_seconds", 86_400_i64)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("log.json", false)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=5000 -> server.port = 5000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.url", database_url_from_env())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("storage.folder_path", std::env::var("FOLDER_PATH").ok())?
            .build()?
            .try_deserialize()
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `DATABASE_URL`, or a URL assembled from `DB_HOST`/`DB_PORT`/`DB_DATABASE`
/// when any of those is set.
fn database_url_from_env() -> Option<String> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Some(url);
    }

    let host = std::env::var("DB_HOST").ok();
    let port = std::env::var("DB_PORT").ok();
    let database = std::env::var("DB_DATABASE").ok();
    if host.is_none() && port.is_none() && database.is_none() {
        return None;
    }

    Some(format!(
        "postgres://{}:{}/{}",
        host.as_deref().unwrap_or("localhost"),
        port.as_deref().unwrap_or("5432"),
        database.as_deref().unwrap_or("files_manager"),
    ))
}

impl Default for Settings {
    /// Development defaults, identical to what `load` yields with no
    /// files or environment.
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".into(),
                port: 5000,
                request_timeout_secs: 30,
            },
            database: DatabaseSettings {
                url: "postgres://localhost:5432/files_manager".into(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout: 5,
            },
            redis: RedisSettings {
                url: "redis://127.0.0.1:6379".into(),
            },
            storage: StorageSettings {
                folder_path: "/tmp/files_manager".into(),
            },
            session: SessionSettings {
                ttl_seconds: 86_400,
            },
            cors: CorsSettings {
                allowed_origins: Vec::new(),
            },
            log: LogSettings { json: false },
            environment: "development".into(),
        }
    }
}
