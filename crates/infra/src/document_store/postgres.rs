//! Postgres-backed document store.
//!
//! All collections share one table; the collection name is part of the key:
//!
//! ```sql
//! CREATE TABLE documents (
//!     collection TEXT  NOT NULL,
//!     id         UUID  NOT NULL,
//!     body       JSONB NOT NULL,
//!     PRIMARY KEY (collection, id)
//! );
//! ```
//!
//! The table is provisioned outside the service.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | `PoolClosed`, `PoolTimedOut`, `Io`, `Tls` | `Unavailable` |
//! | `Database` and everything else | `Backend` |

use std::sync::Arc;

use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;
use uuid::Uuid;

use kennel_core::DocumentId;

use super::r#trait::{
    DeleteOneResult, DocumentStore, InsertOneResult, ReplaceOneResult, StoreError, StoredDocument,
};

/// Postgres-backed document store.
///
/// `Send + Sync`; the SQLx pool handles connection management. Each operation
/// is a single statement, so there is no cross-document atomicity.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: Arc<PgPool>,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect a pool of at most `max_connections` to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("{operation}: connection pool unavailable"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("{operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("{operation}: {e}")),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
            StoreError::Backend(format!(
                "database error in {operation} ({code}): {}",
                db_err.message()
            ))
        }
        other => StoreError::Backend(format!("{operation}: {other}")),
    }
}

fn row_to_document(row: &PgRow) -> Result<StoredDocument, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::Corrupt(format!("failed to read id: {e}")))?;
    let body: JsonValue = row
        .try_get("body")
        .map_err(|e| StoreError::Corrupt(format!("failed to read body: {e}")))?;
    Ok(StoredDocument {
        id: DocumentId::from_uuid(id),
        body,
    })
}

#[async_trait::async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self), err)]
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            ORDER BY id
            "#,
        )
        .bind(collection)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(row_to_document).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_one", e))?;

        row.as_ref().map(row_to_document).transpose()
    }

    #[instrument(skip(self, body), err)]
    async fn insert_one(
        &self,
        collection: &str,
        body: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        let id = DocumentId::new();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&body)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_one", e))?;

        Ok(InsertOneResult { inserted_id: id })
    }

    #[instrument(skip(self, body), err)]
    async fn replace_one(
        &self,
        collection: &str,
        id: DocumentId,
        body: JsonValue,
    ) -> Result<ReplaceOneResult, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&body)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace_one", e))?;

        Ok(ReplaceOneResult {
            matched_count: result.rows_affected(),
        })
    }

    #[instrument(skip(self), err)]
    async fn delete_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<DeleteOneResult, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_one", e))?;

        Ok(DeleteOneResult {
            deleted_count: result.rows_affected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_sqlx_error("insert_one", sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn other_failures_map_to_backend() {
        assert!(matches!(
            map_sqlx_error("find_one", sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        ));
    }
}
