//! Claim set carried inside every issued token.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::logging::pii::fingerprint;

/// Claims included in tokens minted by [`super::ClaimsCodec`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// Opaque user identifier
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Caller-supplied key/value pairs, e.g. `email`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ext: BTreeMap<String, String>,
}

impl ClaimSet {
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.ext.get(key).map(String::as_str)
    }

    /// `sub` non-empty and `exp > iat`.
    pub fn is_well_formed(&self) -> bool {
        !self.sub.is_empty() && self.exp > self.iat
    }

    /// `exp` as a clock reading; `None` if the platform clock cannot represent it.
    pub fn expires_at(&self) -> Option<SystemTime> {
        epoch_offset(self.exp)
    }

    /// Expired strictly after `exp`, compared at full clock precision.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self.expires_at() {
            Some(exp) => now > exp,
            // Unrepresentable: far past or far future
            None => self.exp < 0,
        }
    }
}

/// Signed seconds relative to the epoch as a `SystemTime`.
fn epoch_offset(secs: i64) -> Option<SystemTime> {
    let magnitude = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        UNIX_EPOCH.checked_add(magnitude)
    } else {
        UNIX_EPOCH.checked_sub(magnitude)
    }
}

/// Opaque signed token. `Debug` prints a fingerprint, never the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `Bearer <token>` for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", fingerprint(&self.0))
    }
}
