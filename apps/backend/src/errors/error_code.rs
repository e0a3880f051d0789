//! Public error codes for the tokengate HTTP surface.
//!
//! Every code string a client can observe lives here. Authentication failures
//! deliberately collapse onto `UNAUTHORIZED`/`FORBIDDEN`; the precise reason is
//! carried by [`crate::auth::AuthError`] and only ever reaches the logs.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required (any token/credential validation failure)
    Unauthorized,
    /// Login credentials rejected
    Forbidden,

    // Request Validation
    /// Request body could not be parsed
    BadRequest,
    /// Request body parsed but a field is unusable
    ValidationError,

    // Resource Not Found
    NotFound,

    // System Errors
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// All codes, in declaration order.
    pub const ALL: [ErrorCode; 7] = [
        Self::Unauthorized,
        Self::Forbidden,
        Self::BadRequest,
        Self::ValidationError,
        Self::NotFound,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
