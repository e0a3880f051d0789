use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{ClaimSet, Token};
use super::failure::AuthError;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Seconds since the epoch; negative for clocks set before 1970.
pub fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Mints and verifies HMAC-signed claim sets.
///
/// Built once from [`SecurityConfig`] at startup and shared by reference or
/// cheap clone afterwards. Holds no mutable state.
#[derive(Clone)]
pub struct ClaimsCodec {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl ClaimsCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        // Signature and structure only; expiry is checked against our own clock
        // reading so callers can verify at an explicit instant.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            algorithm: security.algorithm,
            encoding: EncodingKey::from_secret(&security.jwt_secret),
            decoding: DecodingKey::from_secret(&security.jwt_secret),
            validation,
        }
    }

    /// Mint a token valid from now for `ttl`.
    pub fn mint(
        &self,
        subject: &str,
        extras: BTreeMap<String, String>,
        ttl: Duration,
    ) -> Result<Token, AppError> {
        self.mint_at(subject, extras, ttl, SystemTime::now())
    }

    pub fn mint_at(
        &self,
        subject: &str,
        extras: BTreeMap<String, String>,
        ttl: Duration,
        now: SystemTime,
    ) -> Result<Token, AppError> {
        if subject.is_empty() {
            return Err(AppError::internal("cannot mint a token for an empty subject"));
        }
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| AppError::internal("token ttl out of range"))?;
        if ttl_secs == 0 {
            return Err(AppError::internal("token ttl must be at least one second"));
        }

        let iat = unix_seconds(now);
        let claims = ClaimSet {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(ttl_secs),
            ext: extras,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map(Token::new)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Verify a token against the current clock.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Errors:
    /// - signature mismatch → [`AuthError::InvalidSignature`]
    /// - anything structurally wrong, including claim invariants → [`AuthError::Malformed`]
    /// - `now > exp`, at full clock precision → [`AuthError::Expired`]
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<ClaimSet, AuthError> {
        let claims = decode::<ClaimSet>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })?;

        if !claims.is_well_formed() {
            return Err(AuthError::Malformed);
        }

        if claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
