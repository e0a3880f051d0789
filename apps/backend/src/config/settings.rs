//! Startup configuration sourced from the environment.
//!
//! Read once in `main`, then handed to the codec, gate and login flow by value.
//! Nothing here is consulted again after startup.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use super::route_policy::{RouteAuthPolicy, DEFAULT_EXEMPT_ROUTES};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const ENV_JWT_SECRET: &str = "AUTH_JWT_SECRET";
pub const ENV_TOKEN_TTL_SECS: &str = "AUTH_TOKEN_TTL_SECS";
pub const ENV_EXEMPT_ROUTES: &str = "AUTH_EXEMPT_ROUTES";
pub const ENV_USERS_FILE: &str = "AUTH_USERS_FILE";

/// 15 minutes
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 15 * 60;

/// Secrets shorter than this still work but are logged as weak.
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub security: SecurityConfig,
    pub token_ttl: Duration,
    pub route_policy: RouteAuthPolicy,
    /// Optional JSON seed for the in-memory user store
    pub users_file: Option<PathBuf>,
}

impl AuthSettings {
    pub fn new(security: SecurityConfig, token_ttl: Duration, route_policy: RouteAuthPolicy) -> Self {
        Self {
            security,
            token_ttl,
            route_policy,
            users_file: None,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(ENV_JWT_SECRET)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config(format!("{ENV_JWT_SECRET} must be set")))?;
        if secret.len() < RECOMMENDED_SECRET_BYTES {
            warn!(
                len = secret.len(),
                recommended = RECOMMENDED_SECRET_BYTES,
                "{ENV_JWT_SECRET} is shorter than recommended"
            );
        }

        let token_ttl = match lookup(ENV_TOKEN_TTL_SECS) {
            None => Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "{ENV_TOKEN_TTL_SECS} must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        let routes = lookup(ENV_EXEMPT_ROUTES).unwrap_or_else(|| DEFAULT_EXEMPT_ROUTES.to_string());
        let route_policy = RouteAuthPolicy::parse_list(&routes)?;

        let users_file = lookup(ENV_USERS_FILE)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            security: SecurityConfig::new(secret),
            token_ttl,
            route_policy,
            users_file,
        })
    }
}
