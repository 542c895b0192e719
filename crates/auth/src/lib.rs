//! `kennel-auth`: the authentication gate in front of mutating routes.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! pulls a bearer token out of the request and asks an [`Authenticator`] whether
//! the request may continue.

pub mod claims;
pub mod gate;
pub mod jwt;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use gate::{AllowAll, AuthError, Authenticator, DenyAll};
pub use jwt::Hs256JwtValidator;
pub use principal::PrincipalId;
