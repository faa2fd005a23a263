//! The client facade.
//!
//! [`CommerceClient`] wires the configuration, session, transport, operation
//! index, and query cache together. All state is instance-based: two clients
//! against different instances (or different sessions) never share anything.

use std::sync::{Arc, RwLock};

use crate::auth::{is_allowed_access, is_resource_admin, AccessQualifier, Session};
use crate::cache::QueryCache;
use crate::clients::{HttpClient, HttpError};
use crate::config::ApiConfig;
use crate::rest::{OperationResolver, ResourceIntent, ResourceService};
use crate::spec::{default_pseudo_resources, OperationIndex, PseudoResource, SpecLoader};

/// Entry point for talking to a commerce platform instance.
///
/// The client starts with an empty operation index; until [`load_spec`]
/// succeeds, every resource call reports
/// [`Disabled`](crate::rest::ResourceOutcome::Disabled) and every access
/// check denies. Loading the spec is deliberately separate from construction
/// so applications control when the network is touched.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_api::{ApiConfig, BaseApiUrl, CommerceClient, Session};
///
/// let config = ApiConfig::builder()
///     .base_api_url(BaseApiUrl::new("https://api.example.com")?)
///     .build()?;
/// let session = Session::from_token(bearer_token)?;
///
/// let client = CommerceClient::new(config, session);
/// client.load_spec().await?;
///
/// let products = client.resource("products");
/// ```
///
/// [`load_spec`]: Self::load_spec
#[derive(Debug)]
pub struct CommerceClient {
    session: Session,
    http: Arc<HttpClient>,
    cache: Arc<QueryCache>,
    loader: SpecLoader,
    pseudo_resources: Vec<PseudoResource>,
    singular_overrides: Vec<(String, String)>,
    index: RwLock<Arc<OperationIndex>>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CommerceClient>();
};

impl CommerceClient {
    /// Creates a client with the standard pseudo-resource set and an empty
    /// operation index.
    #[must_use]
    pub fn new(config: ApiConfig, session: Session) -> Self {
        let http = Arc::new(HttpClient::new(&config, &session));
        let loader = SpecLoader::new(&config);
        Self {
            session,
            http,
            cache: Arc::new(QueryCache::new()),
            loader,
            pseudo_resources: default_pseudo_resources(),
            singular_overrides: Vec::new(),
            index: RwLock::new(Arc::new(OperationIndex::empty())),
        }
    }

    /// Replaces the pseudo-resource set applied at index build.
    ///
    /// Takes effect on the next [`load_spec`](Self::load_spec).
    #[must_use]
    pub fn with_pseudo_resources(mut self, pseudo_resources: Vec<PseudoResource>) -> Self {
        self.pseudo_resources = pseudo_resources;
        self
    }

    /// Registers an irregular singular form used when deriving me-scoped
    /// operation IDs, e.g. `Categories` → `Category`.
    #[must_use]
    pub fn with_singular_override(
        mut self,
        resource: impl Into<String>,
        singular: impl Into<String>,
    ) -> Self {
        self.singular_overrides
            .push((resource.into(), singular.into()));
        self
    }

    /// Fetches the OpenAPI document and rebuilds the operation index.
    ///
    /// On failure the previous index (possibly empty) stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the document cannot be fetched or decoded.
    pub async fn load_spec(&self) -> Result<(), HttpError> {
        let document = match self.loader.fetch_document().await {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(error = %err, "spec fetch failed, keeping previous operation index");
                return Err(err);
            }
        };
        let index = OperationIndex::build(&document, &self.pseudo_resources);
        tracing::debug!(
            operations = index.len(),
            version = %index.version(),
            "operation index rebuilt"
        );
        self.store_index(Arc::new(index));
        Ok(())
    }

    /// Probes the environment endpoint and reloads the spec when the served
    /// build differs from the loaded document's version.
    ///
    /// Returns true when a reload happened.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if a reload was needed but failed. A failed
    /// probe is not an error; the spec is assumed fresh.
    pub async fn refresh_if_stale(&self) -> Result<bool, HttpError> {
        let version = self.index_snapshot().version().to_string();
        if !self.loader.is_stale(&version).await {
            return Ok(false);
        }
        self.load_spec().await?;
        Ok(true)
    }

    /// Returns true once an operation index has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.index_snapshot().is_empty()
    }

    /// Creates a [`ResourceService`] for the named resource.
    ///
    /// The service captures the current operation index; services created
    /// before a [`load_spec`](Self::load_spec) keep resolving against the
    /// index they were built with.
    #[must_use]
    pub fn resource(&self, name: impl Into<String>) -> ResourceService {
        let mut resolver = OperationResolver::new(self.index_snapshot());
        for (resource, singular) in &self.singular_overrides {
            resolver = resolver.with_singular_override(resource.clone(), singular.clone());
        }
        ResourceService::new(name, resolver, Arc::clone(&self.cache), Arc::clone(&self.http))
    }

    /// Decides whether the session may list the named resource.
    ///
    /// Evaluates the session's roles against the list operation's declared
    /// security roles. Unknown resources, an unloaded index, and tokens
    /// without roles all deny.
    #[must_use]
    pub fn has_access(&self, resource: &str) -> bool {
        let index = self.index_snapshot();
        let resolver = OperationResolver::new(Arc::clone(&index));
        let Some(operation) = resolver.resolve(resource, ResourceIntent::List, None) else {
            return false;
        };

        let roles = self.session.roles();
        let qualifier = AccessQualifier::AnyOf(operation.security_roles.clone());
        is_allowed_access(roles.as_deref(), &qualifier)
    }

    /// Decides whether the session holds an admin-scoped role for the named
    /// resource.
    #[must_use]
    pub fn is_resource_admin(&self, resource: &str) -> bool {
        let index = self.index_snapshot();
        let resolver = OperationResolver::new(Arc::clone(&index));
        let Some(operation) = resolver.resolve(resource, ResourceIntent::List, None) else {
            return false;
        };

        let roles = self.session.roles();
        is_resource_admin(roles.as_deref(), &operation.security_roles)
    }

    /// The session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The shared query cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// A snapshot of the current operation index.
    #[must_use]
    pub fn index_snapshot(&self) -> Arc<OperationIndex> {
        match self.index.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn store_index(&self, index: Arc<OperationIndex>) {
        match self.index.write() {
            Ok(mut guard) => *guard = index,
            Err(poisoned) => *poisoned.into_inner() = index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseApiUrl;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn client_with_roles(roles: serde_json::Value) -> CommerceClient {
        let token = encode(
            &Header::default(),
            &json!({ "role": roles }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        let session = Session::from_token(token).unwrap();
        let config = ApiConfig::builder()
            .base_api_url(BaseApiUrl::new("https://api.example.com").unwrap())
            .build()
            .unwrap();
        CommerceClient::new(config, session)
    }

    fn sample_index() -> Arc<OperationIndex> {
        let document = serde_json::from_value(json!({
            "info": { "version": "1.0.0.1" },
            "paths": {
                "/products": {
                    "get": {
                        "operationId": "Products.List",
                        "security": [{ "OAuth2": ["ProductAdmin", "ProductReader"] }]
                    }
                }
            }
        }))
        .unwrap();
        Arc::new(OperationIndex::build(&document, &[]))
    }

    #[test]
    fn test_client_starts_not_ready() {
        let client = client_with_roles(json!("Shopper"));
        assert!(!client.is_ready());
        assert!(!client.has_access("products"));
    }

    #[test]
    fn test_access_checks_against_loaded_index() {
        let client = client_with_roles(json!(["ProductReader"]));
        client.store_index(sample_index());

        assert!(client.is_ready());
        assert!(client.has_access("products"));
        assert!(!client.is_resource_admin("products"));
        assert!(!client.has_access("shipments"));
    }

    #[test]
    fn test_admin_and_full_access_roles() {
        let admin = client_with_roles(json!(["ProductAdmin"]));
        admin.store_index(sample_index());
        assert!(admin.is_resource_admin("products"));

        let full = client_with_roles(json!("FullAccess"));
        full.store_index(sample_index());
        assert!(full.has_access("products"));
        assert!(full.is_resource_admin("products"));
    }

    #[test]
    fn test_resource_service_captures_index_snapshot() {
        let client = client_with_roles(json!("FullAccess"));
        let stale_service = client.resource("products");

        client.store_index(sample_index());
        let fresh_service = client.resource("products");

        assert_eq!(stale_service.resource(), fresh_service.resource());
        // Both services remain usable; only the fresh one resolves operations.
        assert!(client.is_ready());
    }
}
