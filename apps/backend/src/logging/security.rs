//! Security-relevant log events.
//!
//! Reason codes are only ever written here, never returned to clients.

use tracing::warn;

use crate::auth::AuthError;
use crate::logging::pii::mask_submitted_email;
use crate::trace_ctx;

/// Log a rejected login attempt.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();
    let email = email
        .map(mask_submitted_email)
        .unwrap_or_else(|| "-".to_string());

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        %email,
        reason,
        "Login rejected"
    );
}

/// Log a request rejected by the auth gate.
pub fn request_rejected(reason: AuthError, path: &str, token_fingerprint: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason = reason.reason_code(),
        path,
        token = token_fingerprint.unwrap_or("-"),
        "Authentication failure"
    );
}
