//! Error types for SDK configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use commerce_api::{BaseApiUrl, ConfigError};
//!
//! let result = BaseApiUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base API URL is missing a scheme or otherwise malformed.
    #[error("Invalid base API URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A relative path override (API/spec/env path) is invalid.
    #[error("Invalid path '{path}' for '{field}'. Paths must begin with '/'.")]
    InvalidPath {
        /// The configuration field being set.
        field: &'static str,
        /// The invalid path that was provided.
        path: String,
    },
}
