//! Generic CRUD router, instantiated once per [`Resource`].
//!
//! | Method | Path | Gated | Success |
//! |--------|------|-------|---------|
//! | GET | `/` | no | 200, array of records |
//! | GET | `/:id` | no | 200, record |
//! | POST | `/` | yes | 200, `{"id"}` |
//! | PUT | `/:id` | yes | 200, replacement record |
//! | DELETE | `/:id` | yes | 200, `{"id", "deleted"}` |
//!
//! Unknown ids are 404 on get, replace and delete.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, rejection::JsonRejection},
    routing::{get, post, put},
};

use kennel_core::{Document, DocumentId, Resource};

use crate::app::dto::{CreatedResponse, DeletedResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{AuthState, auth_middleware};

pub fn router<R: Resource>(auth: AuthState) -> Router {
    let gate = axum::middleware::from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list::<R>).merge(post(create::<R>).route_layer(gate.clone())),
        )
        .route(
            "/:id",
            get(fetch::<R>).merge(
                put(replace::<R>)
                    .delete(remove::<R>)
                    .route_layer(gate),
            ),
        )
}

pub async fn list<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Document<R>>>, ApiError> {
    let docs = services.collection::<R>().find_as::<R>().await?;
    Ok(Json(docs))
}

pub async fn fetch<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Document<R>>, ApiError> {
    let id: DocumentId = id.parse()?;
    services
        .collection::<R>()
        .find_one_as::<R>(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(R::KIND))
}

pub async fn create<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<R>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(fields) = body?;

    let inserted = services.collection::<R>().insert_as(&fields).await?;
    tracing::info!(
        collection = R::COLLECTION,
        id = %inserted.inserted_id,
        principal = %principal.principal_id(),
        "record created"
    );

    Ok(Json(CreatedResponse {
        id: inserted.inserted_id,
    }))
}

pub async fn replace<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<R>, JsonRejection>,
) -> Result<Json<Document<R>>, ApiError> {
    let id: DocumentId = id.parse()?;
    let Json(fields) = body?;

    let replaced = services.collection::<R>().replace_as(id, &fields).await?;
    if replaced.matched_count == 0 {
        return Err(ApiError::not_found(R::KIND));
    }
    tracing::info!(
        collection = R::COLLECTION,
        id = %id,
        principal = %principal.principal_id(),
        "record replaced"
    );

    Ok(Json(Document::new(id, fields)))
}

pub async fn remove<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id: DocumentId = id.parse()?;

    let deleted = services.collection::<R>().delete_one(id).await?;
    if deleted.deleted_count == 0 {
        return Err(ApiError::not_found(R::KIND));
    }
    tracing::info!(
        collection = R::COLLECTION,
        id = %id,
        principal = %principal.principal_id(),
        "record deleted"
    );

    Ok(Json(DeletedResponse { id, deleted: true }))
}
