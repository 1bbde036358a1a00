//! # Domain Entities
//!
//! Core domain entities and the repository traits that persist them.
//!
//! - **User**: registered account with its password hash
//! - **FileEntry**: file, image or folder metadata in the owner's tree
//!
//! Repository traits are implemented in the infrastructure layer
//! (PostgreSQL and in-memory), following the dependency inversion principle.

mod file;
mod user;

pub use file::{FileEntry, FileKind, FileRepository, NewFileEntry, ParentRef};
pub use user::{NewUser, User, UserRepository};

#[cfg(test)]
pub use file::MockFileRepository;
#[cfg(test)]
pub use user::MockUserRepository;
