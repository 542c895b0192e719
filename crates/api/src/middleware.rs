use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use kennel_auth::Authenticator;

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<dyn Authenticator>,
}

impl AuthState {
    pub fn new(gate: Arc<dyn Authenticator>) -> Self {
        Self { gate }
    }
}

/// Authentication gate stage: runs the configured [`Authenticator`] and either
/// continues with a [`PrincipalContext`] attached or halts with 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = extract_bearer(req.headers());

    let principal = match state.gate.authenticate(token, Utc::now()) {
        Ok(p) => p,
        Err(e) => {
            tracing::info!(method = %req.method(), path = %req.uri().path(), "auth gate halted request: {e}");
            return ApiError::Unauthorized(e.to_string()).into_response();
        }
    };

    req.extensions_mut().insert(PrincipalContext::new(principal));

    next.run(req).await
}

/// The bearer token of an `Authorization` header, if one was presented.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(&headers("Bearer   abc  ")), Some("abc"));
    }

    #[test]
    fn ignores_missing_or_foreign_schemes() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
    }
}
