//! In-process cache used by tests and single-node development runs.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::{Duration, Instant};

use super::Cache;
use crate::shared::error::AppError;

/// `DashMap`-backed [`Cache`] with lazy expiry on lookup.
///
/// Uses tokio's clock so tests can advance time with a paused runtime.
/// Can be switched "down" to exercise store-unavailable paths.
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, (String, Instant)>,
    alive: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            alive: AtomicBool::new(true),
        }
    }

    /// Simulate losing (or regaining) the connection.
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    /// Number of keys currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_alive(&self) -> Result<(), AppError> {
        if self.alive.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Unavailable("memory cache is down".into()))
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.ensure_alive()?;
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, (_, deadline)| *deadline <= now);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<(), AppError> {
        self.ensure_alive()?;
        let deadline = Instant::now() + Duration::from_secs(seconds);
        self.entries
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        self.ensure_alive()?;
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .map(|(_, (_, deadline))| deadline > now)
            .unwrap_or(false))
    }

    async fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
