//! In-memory user store backing [`IdentityResolver`].
//!
//! Populated once at process start (optionally from a JSON seed file). Any
//! persistent store can replace it by implementing the same trait.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use crate::auth::{Identity, IdentityResolver};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, Identity>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_identities<I>(identities: I) -> Self
    where
        I: IntoIterator<Item = Identity>,
    {
        let store = Self::new();
        for identity in identities {
            store.insert(identity);
        }
        store
    }

    /// Load a JSON array of `{id, name, email}` records.
    pub async fn load_json(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read(path).await.map_err(|e| {
            AppError::config(format!("failed to read user seed {}: {e}", path.display()))
        })?;
        let store = Self::from_json_slice(&raw)?;

        info!(
            path = %path.display(),
            users = store.len(),
            "user_store_seeded"
        );
        Ok(store)
    }

    pub fn from_json_slice(raw: &[u8]) -> Result<Self, AppError> {
        let identities: Vec<Identity> = serde_json::from_slice(raw)
            .map_err(|e| AppError::config(format!("invalid user seed JSON: {e}")))?;

        let mut seen = HashSet::new();
        for identity in &identities {
            if identity.id.trim().is_empty() {
                return Err(AppError::config("user seed contains an empty id"));
            }
            if !seen.insert(identity.id.as_str()) {
                return Err(AppError::config(format!(
                    "user seed contains duplicate id {:?}",
                    identity.id
                )));
            }
        }

        Ok(Self::from_identities(identities))
    }

    /// Insert or replace a user, returning the previous record.
    pub fn insert(&self, identity: Identity) -> Option<Identity> {
        self.users.insert(identity.id.clone(), identity)
    }

    pub fn remove(&self, id: &str) -> Option<Identity> {
        self.users.remove(id).map(|(_, identity)| identity)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for InMemoryUserStore {
    async fn resolve(&self, subject: &str) -> Result<Option<Identity>, AppError> {
        Ok(self.users.get(subject).map(|entry| entry.value().clone()))
    }
}
