//! Cache Service
//!
//! String key-value cache trait and its Redis implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use files_manager::infrastructure::cache::{Cache, RedisCache};
//!
//! let cache = RedisCache::new(redis_connection);
//!
//! cache.set_ex("auth_abc", "6b1c3f9e-...", 86400).await?;
//! let user_id: Option<String> = cache.get("auth_abc").await?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, instrument, warn};

use crate::shared::error::AppError;

/// Key-value cache with per-key expiry.
///
/// This is the whole contract the session layer needs from its cache
/// collaborator. Expiry is enforced by the cache itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Cache: Send + Sync {
    /// Retrieves the value stored at `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - If the key exists and has not expired
    /// * `Ok(None)` - If the key does not exist or has expired
    /// * `Err(AppError)` - If the cache cannot be reached
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` at `key` with a time-to-live in seconds.
    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), AppError>;

    /// Deletes `key`.
    ///
    /// # Returns
    /// * `Ok(true)` - If the key existed and was deleted
    /// * `Ok(false)` - If the key did not exist
    async fn delete(&self, key: &str) -> Result<bool, AppError>;

    /// Liveness probe; never errors.
    async fn is_alive(&self) -> bool;
}

/// Redis-backed cache.
///
/// `ConnectionManager` is cheap to clone and reconnects on its own, so each
/// call works on a clone of the handle.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Cache for RedisCache {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        debug!(hit = value.is_some(), "cache lookup");
        Ok(value)
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn is_alive(&self) -> bool {
        let mut conn = self.conn.clone();
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Redis ping failed");
                false
            }
        }
    }
}
