//! `/shelters`: CRUD over the `shelters` collection.

use axum::Router;

use kennel_core::Shelter;

use crate::app::routes::resource;
use crate::middleware::AuthState;

pub fn router(auth: AuthState) -> Router {
    resource::router::<Shelter>(auth)
}
