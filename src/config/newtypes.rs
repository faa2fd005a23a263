//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated base API URL for a commerce platform instance.
///
/// This newtype ensures the URL is an absolute http(s) URL and normalizes
/// it by stripping any trailing slash, so paths can be appended verbatim.
///
/// # Example
///
/// ```rust
/// use commerce_api::BaseApiUrl;
///
/// let url = BaseApiUrl::new("https://api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseApiUrl(String);

impl BaseApiUrl {
    /// Creates a new validated base API URL.
    ///
    /// Accepts `http://` and `https://` URLs. A single trailing slash is
    /// stripped during normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s)
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let normalized = url.trim_end_matches('/').to_string();
        Ok(Self(normalized))
    }

    /// Joins a path (which must begin with `/`) onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl AsRef<str> for BaseApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_url() {
        let url = BaseApiUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");
    }

    #[test]
    fn test_accepts_http_url() {
        let url = BaseApiUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_strips_trailing_slash() {
        let url = BaseApiUrl::new("https://api.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");
    }

    #[test]
    fn test_rejects_missing_scheme() {
        let result = BaseApiUrl::new("api.example.com");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_rejects_empty_host() {
        let result = BaseApiUrl::new("https://");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_join_appends_path() {
        let url = BaseApiUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.join("/v1/openapi/v3"), "https://api.example.com/v1/openapi/v3");
    }

    #[test]
    fn test_display_matches_as_ref() {
        let url = BaseApiUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.to_string(), url.as_ref());
    }
}
