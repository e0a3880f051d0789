use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ClaimsCodec, IdentityResolver, LoginFlow};
use crate::config::{AuthSettings, RouteAuthPolicy};
use crate::middleware::AuthGate;
use crate::repos::InMemoryUserStore;

use super::security_config::SecurityConfig;

/// Shared, immutable application state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub security: SecurityConfig,
    pub codec: ClaimsCodec,
    pub resolver: Arc<dyn IdentityResolver>,
    pub login: LoginFlow,
    pub route_policy: RouteAuthPolicy,
    pub token_ttl: Duration,
    /// Present when the resolver is the built-in store; feeds `/health`.
    pub users: Option<Arc<InMemoryUserStore>>,
}

impl AppState {
    /// State backed by the in-memory user store.
    pub fn new(settings: AuthSettings, users: Arc<InMemoryUserStore>) -> Self {
        let resolver: Arc<dyn IdentityResolver> = users.clone();
        let mut state = Self::with_resolver(settings, resolver);
        state.users = Some(users);
        state
    }

    /// State backed by any resolver.
    pub fn with_resolver(settings: AuthSettings, resolver: Arc<dyn IdentityResolver>) -> Self {
        let codec = ClaimsCodec::new(&settings.security);
        let login = LoginFlow::new(codec.clone(), Arc::clone(&resolver), settings.token_ttl);

        Self {
            security: settings.security,
            codec,
            resolver,
            login,
            route_policy: settings.route_policy,
            token_ttl: settings.token_ttl,
            users: None,
        }
    }

    /// A gate wired to this state's codec, resolver and policy.
    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(
            self.codec.clone(),
            Arc::clone(&self.resolver),
            self.route_policy.clone(),
        )
    }

    pub fn user_count(&self) -> Option<usize> {
        self.users.as_ref().map(|u| u.len())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("route_policy", &self.route_policy)
            .field("token_ttl", &self.token_ttl)
            .field("users", &self.user_count())
            .finish_non_exhaustive()
    }
}
