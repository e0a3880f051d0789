use std::fmt;

use jsonwebtoken::Algorithm;
use uuid::Uuid;

/// Signing configuration for issued tokens
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret used to sign and verify tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// A config with a fresh random secret, for tests
    pub fn for_tests() -> Self {
        Self::new(format!("test-secret-{}-{}", Uuid::new_v4(), Uuid::new_v4()))
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &format_args!("<{} bytes>", self.jwt_secret.len()))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
