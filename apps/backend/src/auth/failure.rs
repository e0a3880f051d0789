//! Authentication failure taxonomy.
//!
//! These reasons are for server-side observability only. At the HTTP boundary
//! they collapse onto a generic 401 or 403 (see `From<AuthError> for AppError`).

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header
    #[error("missing or malformed bearer credentials")]
    MissingCredentials,
    /// Token is not structurally a valid claim set
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the payload under the configured secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token is past its `exp`
    #[error("token has expired")]
    Expired,
    /// Token verified but its subject no longer resolves to a user
    #[error("token subject does not resolve to a user")]
    UnknownSubject,
    /// Login credentials did not match a stored user
    #[error("invalid login credentials")]
    InvalidCredentials,
}

impl AuthError {
    /// Stable snake_case reason code used in log events.
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::Malformed => "malformed",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::UnknownSubject => "unknown_subject",
            Self::InvalidCredentials => "invalid_credentials",
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
