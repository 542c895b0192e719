//! HS256 bearer-token gate.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::{AuthError, Authenticator, JwtClaims, PrincipalId, validate_claims};

/// Verifies HS256-signed tokens carrying [`JwtClaims`].
///
/// The registered `exp`/`nbf` claims are not used; the token window lives in
/// `issued_at`/`expires_at` and is checked by [`validate_claims`].
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Decode and validate a token, returning its claims.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl Authenticator for Hs256JwtValidator {
    fn authenticate(
        &self,
        credentials: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<PrincipalId, AuthError> {
        let token = credentials.ok_or(AuthError::MissingCredentials)?;
        let claims = self.validate(token, now)?;
        tracing::debug!(principal = %claims.sub, "token accepted");
        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenValidationError;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to encode jwt")
    }

    fn fresh_claims() -> JwtClaims {
        let now = Utc::now();
        JwtClaims {
            sub: PrincipalId::new(),
            issued_at: now - Duration::seconds(5),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let claims = fresh_claims();
        let token = mint("test-secret", &claims);
        let gate = Hs256JwtValidator::new("test-secret");

        let principal = gate.authenticate(Some(&token), Utc::now()).unwrap();
        assert_eq!(principal, claims.sub);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = mint("other-secret", &fresh_claims());
        let gate = Hs256JwtValidator::new("test-secret");

        let err = gate.authenticate(Some(&token), Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)), "{err:?}");
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: PrincipalId::new(),
            issued_at: now - Duration::minutes(20),
            expires_at: now - Duration::minutes(10),
        };
        let token = mint("test-secret", &claims);
        let gate = Hs256JwtValidator::new("test-secret");

        assert_eq!(
            gate.authenticate(Some(&token), now),
            Err(AuthError::Claims(TokenValidationError::Expired))
        );
    }

    #[test]
    fn missing_token_is_rejected() {
        let gate = Hs256JwtValidator::new("test-secret");
        assert_eq!(
            gate.authenticate(None, Utc::now()),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn malformed_token_is_rejected() {
        let gate = Hs256JwtValidator::new("test-secret");
        let err = gate.authenticate(Some("not.a.jwt"), Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
