use std::sync::Arc;

use serde_json::Value as JsonValue;

use kennel_core::{Document, DocumentId, Resource};

use super::r#trait::{
    DeleteOneResult, DocumentStore, InsertOneResult, ReplaceOneResult, StoreError, StoredDocument,
};

/// Handle to one named collection of a [`DocumentStore`].
///
/// Cheap to clone; every call goes straight to the underlying store.
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn DocumentStore>,
    name: String,
}

impl Collection {
    pub fn new(store: Arc<dyn DocumentStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// The collection that holds resource `R`.
    pub fn of<R: Resource>(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, R::COLLECTION)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn find(&self) -> Result<Vec<StoredDocument>, StoreError> {
        self.store.find_all(&self.name).await
    }

    pub async fn find_one(&self, id: DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        self.store.find_one(&self.name, id).await
    }

    pub async fn insert_one(&self, body: JsonValue) -> Result<InsertOneResult, StoreError> {
        self.store.insert_one(&self.name, body).await
    }

    pub async fn replace_one(
        &self,
        id: DocumentId,
        body: JsonValue,
    ) -> Result<ReplaceOneResult, StoreError> {
        self.store.replace_one(&self.name, id, body).await
    }

    pub async fn delete_one(&self, id: DocumentId) -> Result<DeleteOneResult, StoreError> {
        self.store.delete_one(&self.name, id).await
    }

    /// Every document, decoded as `R`.
    pub async fn find_as<R: Resource>(&self) -> Result<Vec<Document<R>>, StoreError> {
        self.find().await?.into_iter().map(decode::<R>).collect()
    }

    pub async fn find_one_as<R: Resource>(
        &self,
        id: DocumentId,
    ) -> Result<Option<Document<R>>, StoreError> {
        self.find_one(id).await?.map(decode::<R>).transpose()
    }

    pub async fn insert_as<R: Resource>(&self, fields: &R) -> Result<InsertOneResult, StoreError> {
        self.insert_one(encode(fields)?).await
    }

    pub async fn replace_as<R: Resource>(
        &self,
        id: DocumentId,
        fields: &R,
    ) -> Result<ReplaceOneResult, StoreError> {
        self.replace_one(id, encode(fields)?).await
    }
}

impl core::fmt::Debug for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish()
    }
}

fn decode<R: Resource>(doc: StoredDocument) -> Result<Document<R>, StoreError> {
    let fields = R::from_json(doc.body)
        .map_err(|e| StoreError::Corrupt(format!("{} {}: {e}", R::KIND, doc.id)))?;
    Ok(Document::new(doc.id, fields))
}

fn encode<R: Resource>(fields: &R) -> Result<JsonValue, StoreError> {
    fields.to_json().map_err(|e| StoreError::Encode(e.to_string()))
}
