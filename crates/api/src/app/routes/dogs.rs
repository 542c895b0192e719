//! `/dogs`: CRUD over the `dogs` collection.

use axum::Router;

use kennel_core::Dog;

use crate::app::routes::resource;
use crate::middleware::AuthState;

pub fn router(auth: AuthState) -> Router {
    resource::router::<Dog>(auth)
}
