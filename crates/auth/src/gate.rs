//! The authentication gate contract.
//!
//! A gate sees the credentials a request presented (if any) and either lets the
//! request continue as some principal or halts it. The API layer runs the gate
//! before every create, replace and delete; reads never reach it.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{PrincipalId, TokenValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("access denied")]
    Denied,
}

/// Pass-or-halt decision for a request.
pub trait Authenticator: Send + Sync {
    /// `credentials` is the bearer token presented with the request, if any.
    fn authenticate(
        &self,
        credentials: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<PrincipalId, AuthError>;
}

impl<A> Authenticator for std::sync::Arc<A>
where
    A: Authenticator + ?Sized,
{
    fn authenticate(
        &self,
        credentials: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<PrincipalId, AuthError> {
        (**self).authenticate(credentials, now)
    }
}

/// Lets every request through as the anonymous principal.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn authenticate(
        &self,
        _credentials: Option<&str>,
        _now: DateTime<Utc>,
    ) -> Result<PrincipalId, AuthError> {
        Ok(PrincipalId::anonymous())
    }
}

/// Halts every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn authenticate(
        &self,
        _credentials: Option<&str>,
        _now: DateTime<Utc>,
    ) -> Result<PrincipalId, AuthError> {
        Err(AuthError::Denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn allow_all_ignores_credentials() {
        let gate = AllowAll;
        let now = Utc::now();
        assert!(gate.authenticate(None, now).unwrap().is_anonymous());
        assert!(gate.authenticate(Some("garbage"), now).unwrap().is_anonymous());
    }

    #[test]
    fn deny_all_halts_even_with_credentials() {
        let gate: Arc<dyn Authenticator> = Arc::new(DenyAll);
        assert_eq!(
            gate.authenticate(Some("token"), Utc::now()),
            Err(AuthError::Denied)
        );
    }
}
