//! Token helpers for tests

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use tokengate::ClaimsCodec;

/// Mint a token for `sub` with an email extra, valid for 15 minutes
pub fn mint_test_token(codec: &ClaimsCodec, sub: &str, email: &str) -> String {
    let extras = BTreeMap::from([("email".to_string(), email.to_string())]);
    codec
        .mint(sub, extras, Duration::from_secs(15 * 60))
        .expect("should mint token successfully")
        .into_string()
}

/// Full `Authorization` header value
pub fn bearer_header(codec: &ClaimsCodec, sub: &str, email: &str) -> String {
    format!("Bearer {}", mint_test_token(codec, sub, email))
}

/// A token that expired an hour ago
pub fn mint_expired_token(codec: &ClaimsCodec, sub: &str) -> String {
    let issued = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    codec
        .mint_at(sub, BTreeMap::new(), Duration::from_secs(60 * 60), issued)
        .expect("should mint expired token")
        .into_string()
}

/// Flip one character inside the signature segment. Avoids the final
/// character, whose low bits are base64 padding.
pub fn tamper_signature(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let at = chars.len() - 5;
    chars[at] = if chars[at] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
