//! PII hygiene for log output.
//!
//! Emails keep their first character and domain; compact tokens are replaced by
//! a short blake3 fingerprint so two log lines about the same token can still be
//! correlated without the token being recoverable.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// A whole value that is exactly one email address
static WHOLE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{1,}$").unwrap()
});

/// Three base64url segments, as in a compact JWT
static COMPACT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}").unwrap()
});

/// First 12 hex chars of the blake3 hash of `secret`.
pub fn fingerprint(secret: &str) -> String {
    let hash = blake3::hash(secret.as_bytes());
    hash.to_hex()[..12].to_string()
}

pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None if email.is_empty() => String::new(),
        None => "***".to_string(),
    }
}

/// Mask a caller-supplied email field for logging.
///
/// Well-formed addresses keep their first character and domain. Anything else
/// is attacker-shaped input and is only logged as a fingerprint.
pub fn mask_submitted_email(input: &str) -> String {
    if WHOLE_EMAIL.is_match(input) {
        redact_email(input)
    } else {
        format!("[unparsed:{}]", fingerprint(input))
    }
}

/// Redact emails and compact tokens inside free text.
pub fn redact(input: &str) -> String {
    let tokens_hidden = COMPACT_TOKEN.replace_all(input, |caps: &regex::Captures| {
        format!("[token:{}]", fingerprint(&caps[0]))
    });

    EMAIL
        .replace_all(&tokens_hidden, |caps: &regex::Captures| redact_email(&caps[0]))
        .into_owned()
}

/// Formats its contents through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
