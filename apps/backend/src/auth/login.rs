use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use super::claims::Token;
use super::failure::AuthError;
use super::identity::{Identity, IdentityResolver};
use super::jwt::ClaimsCodec;
use crate::error::AppError;
use crate::logging::security;

/// Credentials submitted to `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// A successful login.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: Token,
    pub identity: Identity,
}

/// Checks submitted credentials against the user store and mints a token.
///
/// The check is exact equality on the email field; there is no password
/// hashing. An unknown id and a wrong email are indistinguishable to callers.
#[derive(Clone)]
pub struct LoginFlow {
    codec: ClaimsCodec,
    resolver: Arc<dyn IdentityResolver>,
    ttl: Duration,
}

impl LoginFlow {
    pub fn new(codec: ClaimsCodec, resolver: Arc<dyn IdentityResolver>, ttl: Duration) -> Self {
        Self {
            codec,
            resolver,
            ttl,
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<IssuedToken, AppError> {
        let identity = match self.resolver.resolve(&credentials.id).await? {
            Some(identity) if identity.email == credentials.email => identity,
            Some(_) => {
                security::login_failed("email_mismatch", Some(&credentials.email));
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                security::login_failed("unknown_id", Some(&credentials.email));
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let extras = BTreeMap::from([("email".to_string(), identity.email.clone())]);
        let token = self.codec.mint(&identity.id, extras, self.ttl)?;

        info!(sub = %identity.id, token = ?token, "login_succeeded");

        Ok(IssuedToken { token, identity })
    }
}
