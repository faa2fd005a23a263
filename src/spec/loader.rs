//! Fetching the OpenAPI document and probing for staleness.

use crate::clients::{HttpError, HttpResponseError, SDK_VERSION};
use crate::config::ApiConfig;
use crate::spec::document::{ApiDocument, BuildInfo};

/// Fetches the dereferenced OpenAPI document and the environment build
/// number.
///
/// The loader talks to the unversioned spec and environment endpoints, so it
/// carries its own `reqwest` client rather than the versioned [`HttpClient`].
/// Neither endpoint requires authentication.
///
/// [`HttpClient`]: crate::clients::HttpClient
#[derive(Debug)]
pub struct SpecLoader {
    client: reqwest::Client,
    spec_url: String,
    env_url: String,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SpecLoader>();
};

impl SpecLoader {
    /// Creates a loader for the configured instance.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Commerce API Library v{SDK_VERSION}"))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            spec_url: config.spec_url(),
            env_url: config.env_url(),
        }
    }

    /// Fetches and deserializes the OpenAPI document.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] for transport failures and
    /// [`HttpError::Response`] for non-2xx responses or undecodable bodies.
    pub async fn fetch_document(&self) -> Result<ApiDocument, HttpError> {
        let response = self.client.get(&self.spec_url).send().await?;
        let code = response.status().as_u16();
        if !response.status().is_success() {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: format!("spec endpoint returned {code}"),
                error_reference: None,
            }));
        }

        response.json().await.map_err(|err| {
            HttpError::Response(HttpResponseError {
                code,
                message: format!("spec document could not be decoded: {err}"),
                error_reference: None,
            })
        })
    }

    /// Probes the environment endpoint for the currently served build number.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] for transport failures and
    /// [`HttpError::Response`] for non-2xx responses.
    pub async fn fetch_build_number(&self) -> Result<Option<String>, HttpError> {
        let response = self.client.get(&self.env_url).send().await?;
        let code = response.status().as_u16();
        if !response.status().is_success() {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: format!("environment endpoint returned {code}"),
                error_reference: None,
            }));
        }

        let info: BuildInfo = response.json().await.map_err(|err| {
            HttpError::Response(HttpResponseError {
                code,
                message: format!("environment info could not be decoded: {err}"),
                error_reference: None,
            })
        })?;
        Ok(info.build_number)
    }

    /// Returns true when the served build number differs from
    /// `document_version`.
    ///
    /// Only 4-segment build versions are comparable; anything else, and any
    /// probe failure, reports "not stale" so a flaky environment endpoint
    /// never forces a refetch.
    pub async fn is_stale(&self, document_version: &str) -> bool {
        if document_version.split('.').count() != 4 {
            return false;
        }

        match self.fetch_build_number().await {
            Ok(Some(build_number)) => build_number != document_version,
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "environment probe failed, assuming spec is fresh");
                false
            }
        }
    }
}
