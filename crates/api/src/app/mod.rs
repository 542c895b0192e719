//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (document store backend)
//! - `routes/`: HTTP routes + handlers (one generic resource router, one file per resource)
//! - `dto.rs`: response bodies and the JSON payload extractor
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use kennel_auth::{AllowAll, Authenticator, Hs256JwtValidator};
use kennel_infra::{AppConfig, AuthMode, DocumentStore};

use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an existing store and gate.
pub fn build_app(store: Arc<dyn DocumentStore>, gate: Arc<dyn Authenticator>) -> Router {
    let services = Arc::new(services::AppServices::new(store));
    let auth_state = AuthState::new(gate);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(auth_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}

/// Build the router from process configuration (public entrypoint used by `main.rs`).
pub async fn build_app_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let store = services::build_store(config).await?;
    Ok(build_app(store, build_gate(&config.auth)))
}

fn build_gate(mode: &AuthMode) -> Arc<dyn Authenticator> {
    match mode {
        AuthMode::Disabled => {
            tracing::warn!("authentication disabled; all mutating requests are allowed");
            Arc::new(AllowAll)
        }
        AuthMode::Jwt { secret } => Arc::new(Hs256JwtValidator::new(secret.as_bytes())),
    }
}
