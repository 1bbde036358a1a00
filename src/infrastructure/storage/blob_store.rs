//! Local filesystem blob store.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::FileEntry;
use crate::shared::error::AppError;

/// Message returned when bytes are requested for a folder.
pub const FOLDER_HAS_NO_CONTENT: &str = "A folder doesn't have content";

/// Writes and opens blobs under a base directory.
///
/// The directory is created lazily on the first write; metadata and blobs
/// may drift, so every read checks the disk.
#[derive(Debug, Clone)]
pub struct BlobStore {
    base_path: PathBuf,
}

impl BlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `payload` to a fresh uniquely named file and return its path.
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    pub async fn write(&self, payload: &[u8]) -> Result<String, AppError> {
        fs::create_dir_all(&self.base_path).await?;

        let path = self.base_path.join(Uuid::new_v4().to_string());
        fs::write(&path, payload).await?;

        debug!(path = %path.display(), "Blob written");
        Ok(path.to_string_lossy().into_owned())
    }

    /// Open the blob of `entry`, optionally a pre-rendered size variant
    /// stored next to it as `<path>_<size>`.
    ///
    /// # Errors
    /// * `ContentType` for folders
    /// * `NotFound` when the file is missing on disk or the size label is
    ///   not alphanumeric
    #[instrument(skip(self, entry), fields(id = %entry.id))]
    pub async fn open(&self, entry: &FileEntry, size: Option<&str>) -> Result<File, AppError> {
        if entry.is_folder() {
            return Err(AppError::ContentType(FOLDER_HAS_NO_CONTENT.into()));
        }
        let Some(local_path) = entry.local_path.as_deref() else {
            return Err(AppError::NotFound);
        };

        let path = match size {
            None | Some("") => PathBuf::from(local_path),
            Some(size) if size.chars().all(|c| c.is_ascii_alphanumeric()) => {
                PathBuf::from(format!("{}_{}", local_path, size))
            }
            Some(_) => return Err(AppError::NotFound),
        };

        match File::open(&path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Blob missing on disk");
                Err(AppError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }
}
