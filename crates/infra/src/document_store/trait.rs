use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use kennel_core::DocumentId;

/// A record as it sits in the store: its id plus the raw JSON body.
///
/// The body never contains the id; adapters keep it alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: JsonValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOneResult {
    pub inserted_id: DocumentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOneResult {
    pub matched_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOneResult {
    pub deleted_count: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached (pool closed, I/O, timeout, poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored body could not be decoded into the requested resource.
    #[error("corrupt document: {0}")]
    Corrupt(String),

    /// A payload could not be encoded for storage.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Collection-addressed document store.
///
/// Adapters assign ids on insert and never reuse them. `replace_one` and
/// `delete_one` report how many records matched instead of failing, leaving the
/// not-found policy to the caller. Nothing here coordinates concurrent writers:
/// the last write to reach the backend wins.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection`, ordered by id (creation order).
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError>;

    async fn insert_one(
        &self,
        collection: &str,
        body: JsonValue,
    ) -> Result<InsertOneResult, StoreError>;

    /// Replace the whole body of `id`. Never inserts.
    async fn replace_one(
        &self,
        collection: &str,
        id: DocumentId,
        body: JsonValue,
    ) -> Result<ReplaceOneResult, StoreError>;

    async fn delete_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<DeleteOneResult, StoreError>;
}

#[async_trait::async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        (**self).find_all(collection).await
    }

    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        (**self).find_one(collection, id).await
    }

    async fn insert_one(
        &self,
        collection: &str,
        body: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        (**self).insert_one(collection, body).await
    }

    async fn replace_one(
        &self,
        collection: &str,
        id: DocumentId,
        body: JsonValue,
    ) -> Result<ReplaceOneResult, StoreError> {
        (**self).replace_one(collection, id, body).await
    }

    async fn delete_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<DeleteOneResult, StoreError> {
        (**self).delete_one(collection, id).await
    }
}
