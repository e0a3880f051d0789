#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{
    AuthContext, AuthError, ClaimSet, ClaimsCodec, Credentials, FnResolver, Identity,
    IdentityResolver, IssuedToken, LoginFlow, Token,
};
pub use config::{AuthSettings, RouteAuthPolicy};
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::{AuthGate, RequestTrace, StructuredLogger, TraceSpan};
pub use repos::InMemoryUserStore;
pub use state::{AppState, SecurityConfig};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    tokengate_test_support::logging::init();
}
