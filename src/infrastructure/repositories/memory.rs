//! In-memory repositories
//!
//! Vec-backed implementations of the repository traits. Insertion order is
//! preserved, matching the natural order of the PostgreSQL `seq` column.
//! Used by the test suites and for running the server without PostgreSQL.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    EntityId, FileEntry, FileRepository, NewFileEntry, NewUser, ParentRef, User, UserRepository,
};
use crate::infrastructure::database::DatabaseHealth;
use crate::shared::error::AppError;

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, AppError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write();
        // Same unique constraint as the users table
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::validation("Already exist"));
        }

        let created = User {
            id: EntityId::generate(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.read().iter().any(|u| u.email == email))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.users.read().len() as u64)
    }
}

/// In-memory file entry store.
#[derive(Debug, Default)]
pub struct InMemoryFileRepository {
    files: RwLock<Vec<FileEntry>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn children<'a>(
        files: &'a [FileEntry],
        owner: EntityId,
        parent: ParentRef,
    ) -> impl Iterator<Item = &'a FileEntry> {
        files
            .iter()
            .filter(move |f| f.user_id == owner && f.parent_id == parent)
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn insert(&self, entry: NewFileEntry) -> Result<FileEntry, AppError> {
        let created = FileEntry {
            id: EntityId::generate(),
            user_id: entry.user_id,
            name: entry.name,
            kind: entry.kind,
            is_public: entry.is_public,
            parent_id: entry.parent_id,
            local_path: entry.local_path,
            created_at: Utc::now(),
        };
        self.files.write().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<FileEntry>, AppError> {
        Ok(self.files.read().iter().find(|f| f.id == id).cloned())
    }

    async fn set_public(
        &self,
        id: EntityId,
        owner: EntityId,
        is_public: bool,
    ) -> Result<Option<FileEntry>, AppError> {
        let mut files = self.files.write();
        Ok(files
            .iter_mut()
            .find(|f| f.id == id && f.user_id == owner)
            .map(|f| {
                f.is_public = is_public;
                f.clone()
            }))
    }

    async fn count_children(&self, owner: EntityId, parent: ParentRef) -> Result<u64, AppError> {
        let files = self.files.read();
        Ok(Self::children(&files, owner, parent).count() as u64)
    }

    async fn list_children(
        &self,
        owner: EntityId,
        parent: ParentRef,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>, AppError> {
        let files = self.files.read();
        Ok(Self::children(&files, owner, parent)
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.files.read().len() as u64)
    }
}

/// Database probe whose answer tests can flip.
#[derive(Debug)]
pub struct StaticHealth {
    alive: AtomicBool,
}

impl StaticHealth {
    pub fn new(alive: bool) -> Self {
        Self {
            alive: AtomicBool::new(alive),
        }
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseHealth for StaticHealth {
    async fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
