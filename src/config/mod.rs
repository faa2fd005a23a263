//! Configuration types for the commerce API SDK.
//!
//! This module provides type-safe, instance-based configuration:
//!
//! - [`ApiConfig`]: The main configuration struct holding the base API URL
//!   and endpoint path overrides
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`BaseApiUrl`]: A validated newtype for the platform's base URL
//!
//! # Example
//!
//! ```rust
//! use commerce_api::{ApiConfig, BaseApiUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_api_url(BaseApiUrl::new("https://api.example.com").unwrap())
//!     .user_agent_prefix("MyStorefront/2.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url(), "https://api.example.com/v1");
//! ```

mod newtypes;

pub use newtypes::BaseApiUrl;

use crate::error::ConfigError;

/// Default versioned path prefix for API requests.
const DEFAULT_API_PATH: &str = "/v1";

/// Default path of the dereferenced OpenAPI document.
const DEFAULT_SPEC_PATH: &str = "/v1/openapi/v3";

/// Default path of the environment probe returning the build number.
const DEFAULT_ENV_PATH: &str = "/env";

/// Configuration for a commerce API session.
///
/// All configuration is instance-based and passed explicitly; the SDK keeps
/// no global mutable state. Construct via [`ApiConfig::builder`].
///
/// # Example
///
/// ```rust
/// use commerce_api::{ApiConfig, BaseApiUrl};
///
/// let config = ApiConfig::builder()
///     .base_api_url(BaseApiUrl::new("https://sandbox.example.com").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_api_url: BaseApiUrl,
    api_path: String,
    spec_path: String,
    env_path: String,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the validated base API URL.
    #[must_use]
    pub const fn base_api_url(&self) -> &BaseApiUrl {
        &self.base_api_url
    }

    /// Returns the full versioned API URL requests are issued against.
    #[must_use]
    pub fn api_url(&self) -> String {
        self.base_api_url.join(&self.api_path)
    }

    /// Returns the full URL of the OpenAPI document.
    #[must_use]
    pub fn spec_url(&self) -> String {
        self.base_api_url.join(&self.spec_path)
    }

    /// Returns the full URL of the build-number probe endpoint.
    #[must_use]
    pub fn env_url(&self) -> String {
        self.base_api_url.join(&self.env_path)
    }

    /// Returns the configured User-Agent prefix, if any.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`ApiConfig`] instances.
///
/// Required fields are validated by [`build`](Self::build); optional fields
/// have sensible defaults matching the platform's conventional layout.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_api_url: Option<BaseApiUrl>,
    api_path: Option<String>,
    spec_path: Option<String>,
    env_path: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base API URL (required).
    #[must_use]
    pub fn base_api_url(mut self, url: BaseApiUrl) -> Self {
        self.base_api_url = Some(url);
        self
    }

    /// Overrides the versioned API path (default `/v1`).
    #[must_use]
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Overrides the OpenAPI document path (default `/v1/openapi/v3`).
    #[must_use]
    pub fn spec_path(mut self, path: impl Into<String>) -> Self {
        self.spec_path = Some(path.into());
        self
    }

    /// Overrides the build-number probe path (default `/env`).
    #[must_use]
    pub fn env_path(mut self, path: impl Into<String>) -> Self {
        self.env_path = Some(path.into());
        self
    }

    /// Sets an application-specific prefix for the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration, validating all fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_api_url` is
    /// unset, or [`ConfigError::InvalidPath`] if a path override does not
    /// begin with `/`.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_api_url = self
            .base_api_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "base_api_url",
            })?;

        let api_path = validate_path("api_path", self.api_path, DEFAULT_API_PATH)?;
        let spec_path = validate_path("spec_path", self.spec_path, DEFAULT_SPEC_PATH)?;
        let env_path = validate_path("env_path", self.env_path, DEFAULT_ENV_PATH)?;

        Ok(ApiConfig {
            base_api_url,
            api_path,
            spec_path,
            env_path,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Validates an optional path override, falling back to the default.
fn validate_path(
    field: &'static str,
    path: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match path {
        None => Ok(default.to_string()),
        Some(p) if p.starts_with('/') => Ok(p),
        Some(p) => Err(ConfigError::InvalidPath { field, path: p }),
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};
