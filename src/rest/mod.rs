//! The resource layer: operation resolution, URL routing, query
//! serialization, list pages, and the cache-consistent [`ResourceService`].

mod errors;
mod intent;
mod page;
mod resolver;
mod routing;
mod service;

pub use errors::ResourceError;
pub use intent::ResourceIntent;
pub use page::{ListPage, ListPageMeta};
pub use resolver::{normalize_resource_name, OperationResolver};
pub use routing::{
    build_query_string, build_request_url, route_params, ListOptions, QueryValue, RouteParams,
};
pub use service::{ResourceOutcome, ResourceService};
