//! Repository Implementations
//!
//! PostgreSQL and in-memory implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - registered accounts (`users` table)
//! - **FileRepository** - file and folder metadata (`files` table)
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use files_manager::infrastructure::repositories::{PgFileRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let file_repo = PgFileRepository::new(pool);
//! }
//! ```

pub mod file_repository;
pub mod memory;
pub mod user_repository;

pub use file_repository::PgFileRepository;
pub use memory::{InMemoryFileRepository, InMemoryUserRepository, StaticHealth};
pub use user_repository::PgUserRepository;
