//! File entry entity and repository trait.
//!
//! Maps to the `files` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::EntityId;
use crate::shared::error::AppError;

/// Kind of a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    File,
    Image,
}

impl FileKind {
    /// Parse the wire/database representation. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "folder" => Some(Self::Folder),
            "file" => Some(Self::File),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Image => "image",
        }
    }

    /// Folders carry no payload; every other kind has a blob.
    pub fn has_content(&self) -> bool {
        !matches!(self, Self::Folder)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parent of a file entry: the root sentinel or a folder.
///
/// Serializes as the integer `0` for root and as the folder id otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    #[default]
    Root,
    Folder(EntityId),
}

impl ParentRef {
    /// Textual sentinel clients use for "no parent".
    pub const ROOT_SENTINEL: &'static str = "0";

    pub fn from_option(id: Option<EntityId>) -> Self {
        id.map(Self::Folder).unwrap_or(Self::Root)
    }

    pub fn as_option(&self) -> Option<EntityId> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_u8(0),
            Self::Folder(id) => id.serialize(serializer),
        }
    }
}

/// Stored metadata of a file or folder.
///
/// Maps to the `files` table:
/// - id: UUID PRIMARY KEY
/// - user_id: UUID NOT NULL REFERENCES users(id)
/// - name: TEXT NOT NULL
/// - kind: TEXT NOT NULL ('folder' | 'file' | 'image')
/// - is_public: BOOLEAN NOT NULL DEFAULT FALSE
/// - parent_id: UUID NULL (NULL = root)
/// - local_path: TEXT NULL (set for non-folders only)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - seq: BIGSERIAL (insertion order)
///
/// Not `Serialize`: responses go through `FileResponse`, which has no
/// storage path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub id: EntityId,

    /// Owner, fixed at creation
    pub user_id: EntityId,

    pub name: String,

    pub kind: FileKind,

    pub is_public: bool,

    pub parent_id: ParentRef,

    /// Blob location on disk; `None` for folders
    pub local_path: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    pub fn is_owned_by(&self, user_id: &EntityId) -> bool {
        self.user_id == *user_id
    }
}

/// Data required to insert a file entry. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFileEntry {
    pub user_id: EntityId,
    pub name: String,
    pub kind: FileKind,
    pub is_public: bool,
    pub parent_id: ParentRef,
    pub local_path: Option<String>,
}

/// Repository trait for file entry data access.
///
/// Listing order is the natural insertion order of the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Insert one entry.
    async fn insert(&self, entry: NewFileEntry) -> Result<FileEntry, AppError>;

    /// Find an entry by id regardless of owner.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<FileEntry>, AppError>;

    /// Set the visibility flag of an entry owned by `owner`.
    ///
    /// Returns the refreshed entry, or `None` when no entry matches both
    /// id and owner.
    async fn set_public(
        &self,
        id: EntityId,
        owner: EntityId,
        is_public: bool,
    ) -> Result<Option<FileEntry>, AppError>;

    /// Count entries of `owner` directly under `parent`.
    async fn count_children(&self, owner: EntityId, parent: ParentRef) -> Result<u64, AppError>;

    /// Page through entries of `owner` directly under `parent`.
    async fn list_children(
        &self,
        owner: EntityId,
        parent: ParentRef,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>, AppError>;

    /// Total number of entries.
    async fn count(&self) -> Result<u64, AppError>;
}
