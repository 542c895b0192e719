//! Process configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `KENNEL_BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `DATABASE_URL` | unset | Postgres URL; unset means the in-memory store |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | pool size |
//! | `JWT_SECRET` | unset | HS256 secret for the authentication gate |
//! | `KENNEL_AUTH_DISABLED` | `false` | let every mutating request through |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// How mutating requests are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Every request passes.
    Disabled,
    /// Bearer HS256 JWT signed with `secret`.
    Jwt { secret: String },
}

impl core::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Jwt { .. } => f.debug_struct("Jwt").finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub auth: AuthMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("KENNEL_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("KENNEL_BIND_ADDR", e.to_string()))?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        "DATABASE_MAX_CONNECTIONS",
                        "must be at least 1",
                    ));
                }
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", e.to_string())),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let auth_disabled = match get("KENNEL_AUTH_DISABLED") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("KENNEL_AUTH_DISABLED", raw.clone()))?,
            None => false,
        };

        let auth = if auth_disabled {
            AuthMode::Disabled
        } else {
            let secret = get("JWT_SECRET").unwrap_or_else(|| {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            });
            AuthMode::Jwt { secret }
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            auth,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
