//! HTTP API
//!
//! REST handlers, route table and request extractors.

pub mod extractors;
pub mod handlers;
pub mod routes;
