//! Document store: named collections of JSON records keyed by [`DocumentId`].
//!
//! [`DocumentId`]: kennel_core::DocumentId

mod collection;
mod in_memory;
mod postgres;
mod r#trait;

pub use collection::Collection;
pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use r#trait::{
    DeleteOneResult, DocumentStore, InsertOneResult, ReplaceOneResult, StoreError, StoredDocument,
};
