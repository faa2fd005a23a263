//! The resource service.
//!
//! [`ResourceService`] is the typed CRUD surface over one resource. Reads go
//! through the query cache; writes go straight to the transport and then
//! patch the cache so cached reads stay consistent with what the server
//! returned.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{CacheCommand, CacheKey, QueryCache};
use crate::clients::{HttpClient, HttpRequest};
use crate::rest::errors::ResourceError;
use crate::rest::intent::ResourceIntent;
use crate::rest::page::ListPage;
use crate::rest::resolver::OperationResolver;
use crate::rest::routing::{build_query_string, build_request_url, ListOptions, RouteParams};
use crate::spec::Operation;

/// The identifying field used for cache list patching.
const ID_FIELD: &str = "ID";

/// Outcome of a resource call.
///
/// `Disabled` means the connected instance does not expose the operation (or
/// the call was suppressed); it is deliberately distinct from a transport
/// error so callers can degrade features instead of reporting failures.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceOutcome<T> {
    /// The operation is not available on this instance.
    Disabled,
    /// The operation ran and produced data.
    Ready(T),
}

impl<T> ResourceOutcome<T> {
    /// Returns true when the operation was unavailable.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Returns the data, if the operation ran.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Disabled => None,
            Self::Ready(data) => Some(data),
        }
    }

    /// Borrows the data, if the operation ran.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Disabled => None,
            Self::Ready(data) => Some(data),
        }
    }

    /// Maps the contained data.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceOutcome<U> {
        match self {
            Self::Disabled => ResourceOutcome::Disabled,
            Self::Ready(data) => ResourceOutcome::Ready(f(data)),
        }
    }
}

/// Typed CRUD operations over one resource.
///
/// Services are cheap to construct and hold shared handles to the cache and
/// transport; build one per resource as needed rather than storing them.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_api::rest::{route_params, ListOptions};
///
/// let products = client.resource("products");
/// let page = products
///     .list::<Product>(&route_params([]), Some(&ListOptions::new().search("chair")))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct ResourceService {
    resource: String,
    inclusion: Option<String>,
    resolver: OperationResolver,
    cache: Arc<QueryCache>,
    http: Arc<HttpClient>,
}

impl ResourceService {
    /// Creates a service for `resource`.
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        resolver: OperationResolver,
        cache: Arc<QueryCache>,
        http: Arc<HttpClient>,
    ) -> Self {
        Self {
            resource: resource.into(),
            inclusion: None,
            resolver,
            cache,
            http,
        }
    }

    /// Sets the inclusion used by assignment operations, e.g. `"Product"`
    /// for `Categories.ListProductAssignments`.
    #[must_use]
    pub fn with_inclusion(mut self, inclusion: impl Into<String>) -> Self {
        self.inclusion = Some(inclusion.into());
        self
    }

    /// Scopes the service to the authenticated user's view of the resource.
    #[must_use]
    pub fn me_scoped(mut self) -> Self {
        if !self.resource.starts_with("Me.") {
            self.resource = format!("Me.{}", self.resource);
        }
        self
    }

    /// The resource name this service addresses.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Lists a page of items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or an unexpected
    /// response shape. An unsupported operation is `Ok(Disabled)`, not an
    /// error.
    pub async fn list<T: DeserializeOwned>(
        &self,
        params: &RouteParams,
        options: Option<&ListOptions>,
    ) -> Result<ResourceOutcome<ListPage<T>>, ResourceError> {
        let Some(operation) = self.resolver.resolve(&self.resource, ResourceIntent::List, None)
        else {
            return Ok(ResourceOutcome::Disabled);
        };
        let page = self.read_list(operation, params, options).await?;
        Ok(ResourceOutcome::Ready(page))
    }

    /// Fetches one item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or an unexpected
    /// response shape.
    pub async fn get<T: DeserializeOwned>(
        &self,
        params: &RouteParams,
    ) -> Result<ResourceOutcome<T>, ResourceError> {
        let Some(operation) = self.resolver.resolve(&self.resource, ResourceIntent::Get, None)
        else {
            return Ok(ResourceOutcome::Disabled);
        };

        let path = build_request_url(Some(operation), params);
        let key = CacheKey::detail(&operation.operation_id, params);
        let value = self.fetch_cached(operation, key, path).await?;
        Ok(ResourceOutcome::Ready(serde_json::from_value(value)?))
    }

    /// Creates a new item.
    ///
    /// On success the created item is appended to every cached list page
    /// that does not already contain it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or an unexpected
    /// response shape.
    pub async fn create<T: Serialize + DeserializeOwned>(
        &self,
        params: &RouteParams,
        item: &T,
    ) -> Result<ResourceOutcome<T>, ResourceError> {
        self.write_item(params, item, true).await
    }

    /// Creates or updates an item.
    ///
    /// On success the item replaces its match in every cached list page, and
    /// the detail entry is refreshed when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or an unexpected
    /// response shape.
    pub async fn save<T: Serialize + DeserializeOwned>(
        &self,
        params: &RouteParams,
        item: &T,
    ) -> Result<ResourceOutcome<T>, ResourceError> {
        self.write_item(params, item, false).await
    }

    /// Deletes an item.
    ///
    /// The detail entry is dropped. When the resource's list items carry an
    /// `ID` field, the item is removed from cached list pages in place;
    /// otherwise the list cache for this resource is invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures.
    pub async fn delete(&self, params: &RouteParams) -> Result<ResourceOutcome<()>, ResourceError> {
        let Some(operation) = self.resolver.resolve(&self.resource, ResourceIntent::Delete, None)
        else {
            return Ok(ResourceOutcome::Disabled);
        };

        let path = build_request_url(Some(operation), params);
        self.send(operation, path.clone(), None).await?;

        let mut commands = Vec::new();
        if let Some(get_op) = self.resolver.resolve(&self.resource, ResourceIntent::Get, None) {
            commands.push(CacheCommand::RemoveDetail {
                key: CacheKey::detail(&get_op.operation_id, params),
            });
        }
        if let Some(list_op) = self.resolver.resolve(&self.resource, ResourceIntent::List, None) {
            let operation_id = list_op.operation_id.clone();
            if list_op.has_item_field(ID_FIELD) {
                let encoded = path.rsplit('/').next().unwrap_or_default();
                let id = urlencoding::decode(encoded)
                    .map_or_else(|_| encoded.to_string(), std::borrow::Cow::into_owned);
                commands.push(CacheCommand::RemoveFromLists {
                    operation_id,
                    id_field: ID_FIELD.to_string(),
                    id,
                });
            } else {
                commands.push(CacheCommand::InvalidateLists { operation_id });
            }
        }
        self.cache.apply(commands).await;

        Ok(ResourceOutcome::Ready(()))
    }

    /// Lists assignments for the configured inclusion.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or an unexpected
    /// response shape.
    pub async fn list_assignments<T: DeserializeOwned>(
        &self,
        params: &RouteParams,
        options: Option<&ListOptions>,
    ) -> Result<ResourceOutcome<ListPage<T>>, ResourceError> {
        let Some(operation) = self.resolver.resolve(
            &self.resource,
            ResourceIntent::ListAssignments,
            self.inclusion.as_deref(),
        ) else {
            return Ok(ResourceOutcome::Disabled);
        };
        let page = self.read_list(operation, params, options).await?;
        Ok(ResourceOutcome::Ready(page))
    }

    /// Creates or updates an assignment.
    ///
    /// Assignment lists cannot be patched in place (assignments have no
    /// single identifying field), so the assignment list cache is
    /// invalidated on success.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures.
    pub async fn save_assignment<B: Serialize>(
        &self,
        params: &RouteParams,
        assignment: &B,
    ) -> Result<ResourceOutcome<()>, ResourceError> {
        let Some(operation) = self.resolver.resolve(
            &self.resource,
            ResourceIntent::SaveAssignment,
            self.inclusion.as_deref(),
        ) else {
            return Ok(ResourceOutcome::Disabled);
        };

        let path = build_request_url(Some(operation), params);
        let body = serde_json::to_value(assignment)?;
        self.send(operation, path, Some(body)).await?;
        self.invalidate_assignment_lists().await;

        Ok(ResourceOutcome::Ready(()))
    }

    /// Deletes an assignment.
    ///
    /// Parameters the operation declares in the path are routed; the rest
    /// are serialized into the query string (assignment deletes identify the
    /// assignment by query parameters such as `buyerID` and `userID`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures.
    pub async fn delete_assignment(
        &self,
        params: &RouteParams,
    ) -> Result<ResourceOutcome<()>, ResourceError> {
        let Some(operation) = self.resolver.resolve(
            &self.resource,
            ResourceIntent::DeleteAssignment,
            self.inclusion.as_deref(),
        ) else {
            return Ok(ResourceOutcome::Disabled);
        };

        let mut path = build_request_url(Some(operation), params);
        let extras: Vec<(String, String)> = params
            .iter()
            .filter(|(name, _)| !operation.is_path_param(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if !extras.is_empty() {
            let query = build_query_string(&ListOptions::from_pairs(extras));
            if !query.is_empty() {
                path = format!("{path}?{query}");
            }
        }

        self.send(operation, path, None).await?;
        self.invalidate_assignment_lists().await;

        Ok(ResourceOutcome::Ready(()))
    }

    async fn read_list<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        params: &RouteParams,
        options: Option<&ListOptions>,
    ) -> Result<ListPage<T>, ResourceError> {
        let query = options.map(build_query_string).unwrap_or_default();
        let path = build_request_url(Some(operation), params);
        let full_path = if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        };
        let key = CacheKey::list(&operation.operation_id, params, &query);
        let value = self.fetch_cached(operation, key, full_path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Runs a cached read, coalescing with any in-flight fetch for `key`.
    async fn fetch_cached(
        &self,
        operation: &Operation,
        key: CacheKey,
        path: String,
    ) -> Result<serde_json::Value, ResourceError> {
        let verb = operation.verb;
        let http = Arc::clone(&self.http);
        self.cache
            .get_or_fetch(&key, move || async move {
                let request = HttpRequest::builder(verb, path).build()?;
                let response = http.request(request).await?;
                Ok(response.body)
            })
            .await
            .map_err(ResourceError::from_http)
    }

    /// Sends an uncached request, returning the response body.
    async fn send(
        &self,
        operation: &Operation,
        path: String,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ResourceError> {
        let mut builder = HttpRequest::builder(operation.verb, path);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder
            .build()
            .map_err(|err| ResourceError::from_http(err.into()))?;
        let response = self
            .http
            .request(request)
            .await
            .map_err(ResourceError::from_http)?;
        Ok(response.body)
    }

    async fn write_item<T: Serialize + DeserializeOwned>(
        &self,
        params: &RouteParams,
        item: &T,
        is_new: bool,
    ) -> Result<ResourceOutcome<T>, ResourceError> {
        // Creates prefer the Create operation but fall back to Save; some
        // resources only declare an upsert.
        let operation = if is_new {
            self.resolver
                .resolve(&self.resource, ResourceIntent::Create, None)
                .or_else(|| self.resolver.resolve(&self.resource, ResourceIntent::Save, None))
        } else {
            self.resolver.resolve(&self.resource, ResourceIntent::Save, None)
        };
        let Some(operation) = operation else {
            return Ok(ResourceOutcome::Disabled);
        };

        let path = build_request_url(Some(operation), params);
        let body = serde_json::to_value(item)?;
        let saved = self.send(operation, path, Some(body)).await?;

        self.cache
            .apply(self.write_commands(params, &saved, is_new))
            .await;

        Ok(ResourceOutcome::Ready(serde_json::from_value(saved)?))
    }

    /// Cache consequences of a successful create or save.
    fn write_commands(
        &self,
        params: &RouteParams,
        item: &serde_json::Value,
        is_new: bool,
    ) -> Vec<CacheCommand> {
        let mut commands = Vec::new();

        if let Some(get_op) = self.resolver.resolve(&self.resource, ResourceIntent::Get, None) {
            commands.push(CacheCommand::UpsertDetail {
                key: CacheKey::detail(&get_op.operation_id, params),
                item: item.clone(),
            });
        }

        if let Some(list_op) = self.resolver.resolve(&self.resource, ResourceIntent::List, None) {
            let operation_id = list_op.operation_id.clone();
            commands.push(if is_new {
                CacheCommand::InsertIntoLists {
                    operation_id,
                    item: item.clone(),
                    id_field: ID_FIELD.to_string(),
                }
            } else {
                CacheCommand::ReplaceInLists {
                    operation_id,
                    item: item.clone(),
                    id_field: ID_FIELD.to_string(),
                }
            });
        }

        commands
    }

    async fn invalidate_assignment_lists(&self) {
        if let Some(list_op) = self.resolver.resolve(
            &self.resource,
            ResourceIntent::ListAssignments,
            self.inclusion.as_deref(),
        ) {
            self.cache
                .invalidate_operation(&list_op.operation_id)
                .await;
        }
    }
}
