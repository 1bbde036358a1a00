//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::application::services::UploadFile;

/// Registration request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Missing email"),
        length(min = 1, message = "Missing email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Missing password"),
        length(min = 1, message = "Missing password")
    )]
    pub password: Option<String>,
}

/// Upload request
///
/// Fields are validated in a fixed order by `FileService::create`, so
/// nothing here is rejected beyond malformed JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    /// `null`, absent, `0` and `"0"` all mean the root folder
    #[serde(default)]
    pub parent_id: Value,

    /// Base64 payload
    pub data: Option<String>,
}

impl From<UploadFileRequest> for UploadFile {
    fn from(req: UploadFileRequest) -> Self {
        Self {
            name: req.name,
            kind: req.kind,
            is_public: req.is_public,
            parent_id: parent_from_json(req.parent_id),
            data: req.data,
        }
    }
}

fn parent_from_json(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `GET /files` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListFilesQuery {
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

/// `GET /files/{id}/data` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct FileDataQuery {
    pub size: Option<String>,
}
