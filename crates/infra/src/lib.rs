//! Infrastructure layer: document store adapters and process configuration.

pub mod config;
pub mod document_store;

pub use config::{AppConfig, AuthMode, ConfigError};
pub use document_store::{
    Collection, DeleteOneResult, DocumentStore, InMemoryDocumentStore, InsertOneResult,
    PostgresDocumentStore, ReplaceOneResult, StoreError, StoredDocument,
};
