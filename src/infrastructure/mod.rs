//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL, plus in-memory fakes)
//! - Session cache (Redis, plus an in-memory fake)
//! - Blob storage on the local filesystem
//! - Prometheus metrics

pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
