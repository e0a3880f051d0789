use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokengate::{
    AppError, AppState, AuthSettings, Identity, IdentityResolver, InMemoryUserStore,
    RouteAuthPolicy, SecurityConfig,
};

pub fn identity(id: &str, name: &str, email: &str) -> Identity {
    Identity {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

pub fn alice() -> Identity {
    identity("U1", "Alice", "a@x.com")
}

pub fn test_settings() -> AuthSettings {
    AuthSettings::new(
        SecurityConfig::for_tests(),
        Duration::from_secs(15 * 60),
        RouteAuthPolicy::parse_list("/login,/health,/metrics,/public/*").expect("valid policy"),
    )
}

/// State over an in-memory store seeded with `users`.
pub fn state_with_users(users: Vec<Identity>) -> (AppState, Arc<InMemoryUserStore>) {
    let store = Arc::new(InMemoryUserStore::from_identities(users));
    (AppState::new(test_settings(), Arc::clone(&store)), store)
}

/// Wraps a store and counts every resolve call.
#[derive(Default)]
pub struct CountingResolver {
    pub inner: InMemoryUserStore,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(users: Vec<Identity>) -> Self {
        Self {
            inner: InMemoryUserStore::from_identities(users),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityResolver for CountingResolver {
    async fn resolve(&self, subject: &str) -> Result<Option<Identity>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(subject).await
    }
}

/// A store that is always down.
pub struct FailingResolver;

#[async_trait]
impl IdentityResolver for FailingResolver {
    async fn resolve(&self, _subject: &str) -> Result<Option<Identity>, AppError> {
        Err(AppError::internal("user store unavailable"))
    }
}
