//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **EntityId**: canonical id for users, file entries and session values
//! - **Page**: 1-indexed listing page with a fixed size

mod entity_id;
mod page;

pub use entity_id::*;
pub use page::*;
