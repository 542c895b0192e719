use std::sync::Arc;

use kennel_core::Resource;
use kennel_infra::{
    AppConfig, Collection, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError,
};

/// Shared request-independent services handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn DocumentStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The collection backing resource `R`.
    pub fn collection<R: Resource>(&self) -> Collection {
        Collection::of::<R>(self.store.clone())
    }
}

/// Pick the document store backend: Postgres when `DATABASE_URL` is set,
/// in-memory otherwise.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresDocumentStore::connect(url, config.database_max_connections).await?;
            tracing::info!(max_connections = config.database_max_connections, "using postgres document store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("DATABASE_URL not set; using in-memory document store");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}
