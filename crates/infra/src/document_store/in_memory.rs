use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use kennel_core::DocumentId;

use super::r#trait::{
    DeleteOneResult, DocumentStore, InsertOneResult, ReplaceOneResult, StoreError, StoredDocument,
};

type CollectionMap = BTreeMap<DocumentId, JsonValue>;

/// In-memory document store.
///
/// Intended for tests/dev. Collections come into existence on first insert.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, CollectionMap>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection` (0 for unknown collections).
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        let docs = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| StoredDocument {
                        id: *id,
                        body: body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .map(|body| StoredDocument {
                id,
                body: body.clone(),
            }))
    }

    async fn insert_one(
        &self,
        collection: &str,
        body: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let docs = collections.entry(collection.to_string()).or_default();

        let mut id = DocumentId::new();
        while docs.contains_key(&id) {
            id = DocumentId::new();
        }
        docs.insert(id, body);

        Ok(InsertOneResult { inserted_id: id })
    }

    async fn replace_one(
        &self,
        collection: &str,
        id: DocumentId,
        body: JsonValue,
    ) -> Result<ReplaceOneResult, StoreError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let matched_count = match collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id))
        {
            Some(existing) => {
                *existing = body;
                1
            }
            None => 0,
        };
        Ok(ReplaceOneResult { matched_count })
    }

    async fn delete_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<DeleteOneResult, StoreError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let deleted_count = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id))
            .map_or(0, |_| 1);
        Ok(DeleteOneResult { deleted_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn rt() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("failed to build runtime")
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryDocumentStore::new();
        assert!(store.find_all("shelters").await.unwrap().is_empty());
        assert!(store.is_empty("shelters"));
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let store = InMemoryDocumentStore::new();
        let a = store.insert_one("dogs", json!({"name": "a"})).await.unwrap();
        let b = store.insert_one("dogs", json!({"name": "b"})).await.unwrap();

        assert_ne!(a.inserted_id, b.inserted_id);
        assert_eq!(store.len("dogs"), 2);
    }

    #[tokio::test]
    async fn replace_overwrites_whole_body() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("dogs", json!({"name": "Old", "age": 3}))
            .await
            .unwrap()
            .inserted_id;

        let res = store
            .replace_one("dogs", id, json!({"name": "New"}))
            .await
            .unwrap();
        assert_eq!(res.matched_count, 1);

        let doc = store.find_one("dogs", id).await.unwrap().unwrap();
        assert_eq!(doc.body, json!({"name": "New"}));
    }

    #[tokio::test]
    async fn replace_of_missing_id_matches_nothing_and_does_not_insert() {
        let store = InMemoryDocumentStore::new();
        let res = store
            .replace_one("dogs", DocumentId::new(), json!({"name": "Ghost"}))
            .await
            .unwrap();

        assert_eq!(res.matched_count, 0);
        assert!(store.is_empty("dogs"));
    }

    #[tokio::test]
    async fn delete_removes_and_reports_count() {
        let store = InMemoryDocumentStore::new();
        let id = store.insert_one("dogs", json!({})).await.unwrap().inserted_id;

        assert_eq!(store.delete_one("dogs", id).await.unwrap().deleted_count, 1);
        assert_eq!(store.delete_one("dogs", id).await.unwrap().deleted_count, 0);
        assert!(store.find_one("dogs", id).await.unwrap().is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: after any mix of inserts and deletes, listing returns exactly
        /// the live documents.
        #[test]
        fn list_length_equals_live_documents(
            ops in prop::collection::vec((any::<bool>(), 0usize..8), 1..40)
        ) {
            let rt = rt();
            let store = InMemoryDocumentStore::new();
            let mut live: Vec<DocumentId> = Vec::new();

            rt.block_on(async {
                for (insert, pick) in ops {
                    if insert || live.is_empty() {
                        let res = store.insert_one("dogs", json!({"n": pick})).await.unwrap();
                        live.push(res.inserted_id);
                    } else {
                        let id = live.remove(pick % live.len());
                        let res = store.delete_one("dogs", id).await.unwrap();
                        assert_eq!(res.deleted_count, 1);
                    }
                }
            });

            let listed = rt.block_on(store.find_all("dogs")).unwrap();
            prop_assert_eq!(listed.len(), live.len());
            for id in &live {
                prop_assert!(listed.iter().any(|d| d.id == *id));
            }
        }
    }
}
