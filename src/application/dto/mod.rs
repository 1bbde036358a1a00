//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{FileDataQuery, ListFilesQuery, RegisterRequest, UploadFileRequest};
pub use response::{FileResponse, TokenResponse, UserResponse};
