//! Access Control Gate
//!
//! Turns a session token into a caller and decides whether that caller
//! may see a file entry. A denial is reported as `NotFound` so private
//! entries of other users are indistinguishable from missing ones.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::{EntityId, FileEntry, User, UserRepository};
use crate::infrastructure::cache::SessionStore;
use crate::shared::error::AppError;

/// Who is making a request.
#[derive(Debug, Clone)]
pub enum Caller {
    User(User),
    Anonymous,
}

impl Caller {
    pub fn user(&self) -> Option<&User> {
        match self {
            Caller::User(user) => Some(user),
            Caller::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<EntityId> {
        self.user().map(|u| u.id)
    }
}

/// Outcome of a read check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

#[derive(Clone)]
pub struct AccessGate {
    users: Arc<dyn UserRepository>,
    sessions: SessionStore,
}

impl AccessGate {
    pub fn new(users: Arc<dyn UserRepository>, sessions: SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Resolve an optional token to a caller.
    ///
    /// Unknown tokens, expired tokens and tokens pointing at a missing user
    /// all yield `Anonymous`. Only store failures are errors.
    #[instrument(skip_all, fields(has_token = token.is_some()))]
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Caller, AppError> {
        let Some(token) = token else {
            return Ok(Caller::Anonymous);
        };

        let Some(user_id) = self.sessions.resolve(token).await? else {
            return Ok(Caller::Anonymous);
        };

        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(Caller::User(user)),
            None => {
                warn!(user_id = %user_id, "Session points at a missing user");
                Ok(Caller::Anonymous)
            }
        }
    }

    /// Public entries are visible to everyone, private ones to their owner.
    pub fn authorize(&self, entry: &FileEntry, caller: &Caller) -> Access {
        if entry.is_public {
            return Access::Allow;
        }

        match caller.user_id() {
            Some(id) if entry.is_owned_by(&id) => Access::Allow,
            _ => Access::Deny,
        }
    }

    /// `authorize`, with a denial surfaced as `NotFound`.
    pub fn ensure_visible(&self, entry: &FileEntry, caller: &Caller) -> Result<(), AppError> {
        match self.authorize(entry, caller) {
            Access::Allow => Ok(()),
            Access::Deny => Err(AppError::NotFound),
        }
    }

    /// Demand an authenticated caller.
    pub fn require_user(caller: Caller) -> Result<User, AppError> {
        match caller {
            Caller::User(user) => Ok(user),
            Caller::Anonymous => Err(AppError::Unauthorized),
        }
    }
}
