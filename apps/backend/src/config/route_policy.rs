//! Routes that bypass authentication.
//!
//! Patterns are absolute request paths and may contain wildcards:
//! - Exact paths: `/login`
//! - Segment wildcards: `/public/*/avatar` (`*` never crosses a `/`)
//! - Subtree wildcards: `/docs/**` (matches `/docs` and everything below it)

use std::collections::HashSet;

use regex::Regex;

use crate::error::AppError;

pub const DEFAULT_EXEMPT_ROUTES: &str = "/login,/health,/metrics";

/// Immutable set of exempt route patterns, compiled once at startup.
#[derive(Debug, Clone, Default)]
pub struct RouteAuthPolicy {
    exact: HashSet<String>,
    wildcards: Vec<Regex>,
}

impl RouteAuthPolicy {
    pub fn new<I, S>(patterns: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::default();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            if !pattern.starts_with('/') {
                return Err(AppError::config(format!(
                    "exempt route pattern must start with '/': {pattern:?}"
                )));
            }

            if pattern.contains('*') {
                policy.wildcards.push(Self::compile(pattern)?);
            } else {
                policy.exact.insert(pattern.to_string());
            }
        }

        Ok(policy)
    }

    /// Parse a comma-separated pattern list, e.g. from `AUTH_EXEMPT_ROUTES`.
    pub fn parse_list(list: &str) -> Result<Self, AppError> {
        Self::new(list.split(','))
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exact.contains(path) || self.wildcards.iter().any(|re| re.is_match(path))
    }

    pub fn pattern_count(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    fn compile(pattern: &str) -> Result<Regex, AppError> {
        let (body, subtree) = match pattern.strip_suffix("/**") {
            Some(prefix) => (prefix, true),
            None => (pattern, false),
        };

        let mut source = String::from("^");
        let mut rest = body;
        while let Some(idx) = rest.find('*') {
            source.push_str(&regex::escape(&rest[..idx]));
            if rest[idx..].starts_with("**") {
                source.push_str(".*");
                rest = &rest[idx + 2..];
            } else {
                source.push_str("[^/]*");
                rest = &rest[idx + 1..];
            }
        }
        source.push_str(&regex::escape(rest));
        if subtree {
            source.push_str("(?:/.*)?");
        }
        source.push('$');

        Regex::new(&source).map_err(|e| {
            AppError::config(format!("invalid exempt route pattern {pattern:?}: {e}"))
        })
    }
}
