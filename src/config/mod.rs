//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus PORT, DATABASE_URL,
//!   DB_HOST/DB_PORT/DB_DATABASE, REDIS_URL and FOLDER_PATH)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use files_manager::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Blobs go to {}", settings.storage.folder_path);
//! ```

mod settings;

pub use settings::*;
