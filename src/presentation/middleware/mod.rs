//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{resolve_caller, token_from_headers, TOKEN_HEADER};
