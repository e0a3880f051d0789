use serde::Serialize;

use super::claims::ClaimSet;
use super::identity::Identity;

/// Per-request authentication result, stored in request extensions by the
/// auth gate and dropped with the request.
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub identity: Identity,
    pub claims: ClaimSet,
}

impl AuthContext {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}
