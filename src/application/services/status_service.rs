//! Status Service
//!
//! Liveness of both stores and document counts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{FileRepository, UserRepository};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::database::DatabaseHealth;
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub redis: bool,
    pub db: bool,
}

impl StoreStatus {
    pub fn all_alive(&self) -> bool {
        self.redis && self.db
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub users: u64,
    pub files: u64,
}

#[derive(Clone)]
pub struct StatusService {
    cache: Arc<dyn Cache>,
    db: Arc<dyn DatabaseHealth>,
    users: Arc<dyn UserRepository>,
    files: Arc<dyn FileRepository>,
}

impl StatusService {
    pub fn new(
        cache: Arc<dyn Cache>,
        db: Arc<dyn DatabaseHealth>,
        users: Arc<dyn UserRepository>,
        files: Arc<dyn FileRepository>,
    ) -> Self {
        Self {
            cache,
            db,
            users,
            files,
        }
    }

    pub async fn status(&self) -> StoreStatus {
        let (redis, db) = tokio::join!(self.cache.is_alive(), self.db.is_alive());
        StoreStatus { redis, db }
    }

    pub async fn stats(&self) -> Result<Stats, AppError> {
        let (users, files) = tokio::try_join!(self.users.count(), self.files.count())?;
        Ok(Stats { users, files })
    }
}
