use axum::Router;

use crate::middleware::AuthState;

pub mod dogs;
pub mod resource;
pub mod shelters;
pub mod system;

/// Router for every resource; mutating routes run behind the auth gate.
pub fn router(auth: AuthState) -> Router {
    Router::new()
        .nest("/shelters", shelters::router(auth.clone()))
        .nest("/dogs", dogs::router(auth))
}
