//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Credential verification, connect/disconnect
//! - **AccessGate**: Token to caller resolution and read authorization
//! - **UserService**: Registration
//! - **FileService**: Upload, lookup, listing, visibility and content
//! - **StatusService**: Store liveness and document counts

pub mod access_gate;
pub mod auth_service;
pub mod file_service;
pub mod status_service;
pub mod user_service;

pub use access_gate::{Access, AccessGate, Caller};
pub use auth_service::{hash_password, verify_password, AuthService};
pub use file_service::{FileService, UploadFile};
pub use status_service::{Stats, StatusService, StoreStatus};
pub use user_service::UserService;
