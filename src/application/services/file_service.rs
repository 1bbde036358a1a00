//! File Service
//!
//! Upload, lookup, listing and visibility of file entries.
//!
//! All structural validation happens before any side effect. A non-folder
//! upload then writes the blob first and the metadata second; a failed
//! metadata insert leaves an orphaned blob behind, which is accepted.

use std::sync::Arc;

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use tokio::fs::File;
use tracing::{debug, info, instrument};

use super::access_gate::{AccessGate, Caller};
use crate::domain::{
    EntityId, FileEntry, FileKind, FileRepository, NewFileEntry, Page, ParentRef, User,
};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::BlobStore;
use crate::shared::error::AppError;

pub const MISSING_NAME: &str = "Missing name";
pub const MISSING_TYPE: &str = "Missing type";
pub const MISSING_DATA: &str = "Missing data";
pub const INVALID_DATA: &str = "Invalid data";
pub const PARENT_NOT_FOUND: &str = "Parent not found";
pub const PARENT_NOT_A_FOLDER: &str = "Parent is not a folder";

/// Standard alphabet, padding optional.
const PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An upload as received, before validation.
#[derive(Debug, Clone, Default)]
pub struct UploadFile {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub is_public: bool,
    /// `None` for the root folder
    pub parent_id: Option<String>,
    /// Base64-encoded payload, required unless `kind` is `folder`
    pub data: Option<String>,
}

#[derive(Clone)]
pub struct FileService {
    files: Arc<dyn FileRepository>,
    blobs: BlobStore,
    gate: AccessGate,
}

impl FileService {
    pub fn new(files: Arc<dyn FileRepository>, blobs: BlobStore, gate: AccessGate) -> Self {
        Self { files, blobs, gate }
    }

    /// Create a file, image or folder owned by `owner`.
    #[instrument(skip_all, fields(owner = %owner.id))]
    pub async fn create(&self, owner: &User, upload: UploadFile) -> Result<FileEntry, AppError> {
        let name = upload
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation(MISSING_NAME))?;

        let kind = upload
            .kind
            .as_deref()
            .and_then(FileKind::parse)
            .ok_or_else(|| AppError::validation(MISSING_TYPE))?;

        let payload = if kind.has_content() {
            let data = upload
                .data
                .filter(|d| !d.is_empty())
                .ok_or_else(|| AppError::validation(MISSING_DATA))?;
            let bytes = PAYLOAD
                .decode(data.trim())
                .map_err(|_| AppError::validation(INVALID_DATA))?;
            Some(bytes)
        } else {
            None
        };

        let parent_id = self.resolve_parent(upload.parent_id.as_deref()).await?;

        let local_path = match payload {
            Some(bytes) => Some(self.blobs.write(&bytes).await?),
            None => None,
        };

        let entry = self
            .files
            .insert(NewFileEntry {
                user_id: owner.id,
                name,
                kind,
                is_public: upload.is_public,
                parent_id,
                local_path,
            })
            .await?;

        metrics::record_file_created(kind.as_str());
        info!(file_id = %entry.id, kind = %kind, "File entry created");
        Ok(entry)
    }

    /// Fetch one entry the caller may see.
    ///
    /// Malformed ids, missing entries and private entries of other users
    /// are all `NotFound`.
    #[instrument(skip(self, caller))]
    pub async fn get(&self, id: &str, caller: &Caller) -> Result<FileEntry, AppError> {
        let id = id.parse::<EntityId>().map_err(|_| AppError::NotFound)?;
        let entry = self
            .files
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.gate.ensure_visible(&entry, caller)?;
        Ok(entry)
    }

    /// One page of the owner's entries directly under `parent_id`.
    ///
    /// An absent or `0` parent means the root; a parent that is not a valid
    /// id matches nothing.
    #[instrument(skip(self, owner), fields(owner = %owner.id))]
    pub async fn list(
        &self,
        owner: &User,
        parent_id: Option<&str>,
        page: Option<&str>,
    ) -> Result<Vec<FileEntry>, AppError> {
        let parent = match parent_id {
            None | Some("") | Some(ParentRef::ROOT_SENTINEL) => ParentRef::Root,
            Some(raw) => match raw.parse::<EntityId>() {
                Ok(id) => ParentRef::Folder(id),
                Err(_) => return Ok(Vec::new()),
            },
        };
        let page = Page::parse(page);

        let total = self.files.count_children(owner.id, parent).await?;
        if total <= page.offset() {
            debug!(total, page = page.number(), "Nothing to list");
            return Ok(Vec::new());
        }

        self.files
            .list_children(owner.id, parent, page.offset(), page.limit())
            .await
    }

    /// Set the visibility of one of the owner's entries.
    #[instrument(skip(self, owner), fields(owner = %owner.id))]
    pub async fn set_visibility(
        &self,
        id: &str,
        owner: &User,
        is_public: bool,
    ) -> Result<FileEntry, AppError> {
        let id = id.parse::<EntityId>().map_err(|_| AppError::NotFound)?;

        let entry = self
            .files
            .set_public(id, owner.id, is_public)
            .await?
            .ok_or(AppError::NotFound)?;

        info!(file_id = %entry.id, is_public, "Visibility changed");
        Ok(entry)
    }

    /// Open the bytes of an entry the caller may see.
    ///
    /// The read rule is applied first, so a folder of another user is
    /// `NotFound` rather than a content-type error.
    #[instrument(skip(self, caller))]
    pub async fn read_content(
        &self,
        id: &str,
        caller: &Caller,
        size: Option<&str>,
    ) -> Result<(FileEntry, File), AppError> {
        let entry = self.get(id, caller).await?;
        let file = self.blobs.open(&entry, size).await?;
        Ok((entry, file))
    }

    /// Total number of entries.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.files.count().await
    }

    async fn resolve_parent(&self, raw: Option<&str>) -> Result<ParentRef, AppError> {
        let raw = match raw {
            None | Some("") | Some(ParentRef::ROOT_SENTINEL) => return Ok(ParentRef::Root),
            Some(raw) => raw,
        };

        let id = raw
            .parse::<EntityId>()
            .map_err(|_| AppError::validation(PARENT_NOT_FOUND))?;
        let parent = self
            .files
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::validation(PARENT_NOT_FOUND))?;

        if !parent.is_folder() {
            return Err(AppError::validation(PARENT_NOT_A_FOLDER));
        }

        Ok(ParentRef::Folder(parent.id))
    }
}
