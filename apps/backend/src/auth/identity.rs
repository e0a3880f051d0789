//! Subject → user identity resolution.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A user record as owned by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Lookup capability the auth core depends on.
///
/// `Ok(None)` means the subject does not exist (e.g. deleted account) and is
/// not an error. `Err` is reserved for store failures. Implementations must
/// not hold locks across their own await points.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, subject: &str) -> Result<Option<Identity>, AppError>;
}

#[async_trait]
impl<R> IdentityResolver for Arc<R>
where
    R: IdentityResolver + ?Sized,
{
    async fn resolve(&self, subject: &str) -> Result<Option<Identity>, AppError> {
        (**self).resolve(subject).await
    }
}

/// Adapts a synchronous lookup function into an [`IdentityResolver`].
pub struct FnResolver<F>(pub F);

#[async_trait]
impl<F> IdentityResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<Identity> + Send + Sync,
{
    async fn resolve(&self, subject: &str) -> Result<Option<Identity>, AppError> {
        Ok((self.0)(subject))
    }
}
