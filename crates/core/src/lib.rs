//! Core domain types for the CRM client.
//!
//! Zero internal dependencies: identifiers, dates, the shared error type,
//! the [`entity::Entity`] abstraction, and the field structs of every CRM
//! entity.

pub mod entities;
pub mod entity;
pub mod error;
pub mod types;

pub use entity::{Entity, EntityKind, FieldValue, Record, Stored};
pub use error::CoreError;
pub use types::{Date, DbId};
