//! `kennel-core`: domain building blocks shared by every layer.
//!
//! This crate contains **pure domain** types (no storage, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod resource;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
pub use resource::{Document, Dog, Resource, Shelter};
