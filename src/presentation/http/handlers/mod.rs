//! HTTP Handlers
//!
//! Request handlers for REST API endpoints.

pub mod auth;
pub mod file;
pub mod health;
pub mod user;
