use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use kennel_core::DomainError;
use kennel_infra::StoreError;

/// Every failure a handler can report, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str },

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(kind: &'static str) -> Self {
        Self::NotFound { kind }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidId(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidId(_) => "invalid_id",
            Self::InvalidInput(_) => "invalid_input",
            Self::Unauthorized(_) => "unauthorized",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
            Self::Store(_) => "store_error",
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(msg) => Self::InvalidId(msg),
            DomainError::Validation(msg) => Self::InvalidInput(msg),
            DomainError::NotFound => Self::not_found("record"),
            DomainError::Unauthorized => Self::Unauthorized("unauthorized".to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::warn!(error = %e, "store operation failed");
        }
        json_error(self.status(), self.code(), self.to_string())
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_distinct_policy() {
        let cases = [
            (ApiError::not_found("dog"), StatusCode::NOT_FOUND, "not_found"),
            (ApiError::InvalidId("x".into()), StatusCode::BAD_REQUEST, "invalid_id"),
            (ApiError::InvalidInput("x".into()), StatusCode::BAD_REQUEST, "invalid_input"),
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "unauthorized"),
            (
                ApiError::Store(StoreError::Unavailable("down".into())),
                StatusCode::BAD_GATEWAY,
                "store_unavailable",
            ),
            (
                ApiError::Store(StoreError::Backend("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status(), status, "{err:?}");
            assert_eq!(err.code(), code, "{err:?}");
        }
    }

    #[test]
    fn domain_errors_translate() {
        assert!(matches!(
            ApiError::from(DomainError::invalid_id("1")),
            ApiError::InvalidId(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::validation("age")),
            ApiError::InvalidInput(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::not_found()),
            ApiError::NotFound { .. }
        ));
    }

    #[test]
    fn not_found_message_names_the_kind() {
        assert_eq!(ApiError::not_found("shelter").to_string(), "shelter not found");
    }
}
