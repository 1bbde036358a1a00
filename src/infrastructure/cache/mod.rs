//! Cache Module
//!
//! Redis connection management and the session store built on it.
//!
//! This module provides:
//! - Redis connection management with automatic reconnection
//! - A `Cache` trait abstracting the three key-value operations sessions need
//! - `RedisCache` (production) and `MemoryCache` (tests, local runs)
//! - `SessionStore`, which maps opaque tokens to user ids
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! |   SessionStore    |
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |   Cache Trait     |  <-- Abstract interface
//! +-------------------+
//!          |
//!    +-----+------+
//!    v            v
//! RedisCache  MemoryCache
//! ```

mod cache_service;
mod memory_cache;
mod session_cache;

pub use cache_service::{Cache, RedisCache};
pub use memory_cache::MemoryCache;
pub use session_cache::{SessionStore, DEFAULT_SESSION_TTL_SECS};

#[cfg(test)]
pub use cache_service::MockCache;

use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
///
/// # Errors
/// Returns `redis::RedisError` if the URL is invalid or the first
/// connection fails.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Creates a `RedisCache` instance from configuration settings.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_cache(settings: &RedisSettings) -> Result<RedisCache, redis::RedisError> {
    let conn = create_redis_client(settings).await?;
    Ok(RedisCache::new(conn))
}

/// Cache key prefixes.
pub mod keys {
    /// Prefix for session tokens (e.g., "auth_<token>")
    pub const AUTH: &str = "auth_";

    /// Generates the key holding a session's user id
    #[inline]
    pub fn auth(token: &str) -> String {
        format!("{}{}", AUTH, token)
    }
}
