//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{EntityId, FileEntry, FileKind, ParentRef, User};

/// File entry as exposed over HTTP. The storage path never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub is_public: bool,
    pub parent_id: ParentRef,
}

impl From<FileEntry> for FileResponse {
    fn from(entry: FileEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            name: entry.name,
            kind: entry.kind,
            is_public: entry.is_public,
            parent_id: entry.parent_id,
        }
    }
}

/// User response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Session token issued by `/connect`
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
