//! Blob Storage
//!
//! Raw payloads of non-folder entries live on the local filesystem, one
//! file per blob, named by a generated UUID:
//!
//! ```text
//! {folder_path}/
//! ├── 0d9c3f52-8f0e-4a55-9a43-0d5b1a6b1e77
//! ├── 0d9c3f52-8f0e-4a55-9a43-0d5b1a6b1e77_250   <- pre-rendered size variant
//! └── 5b2e...
//! ```

mod blob_store;

pub use blob_store::{BlobStore, FOLDER_HAS_NO_CONTENT};
