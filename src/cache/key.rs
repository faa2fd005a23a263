//! Cache key construction.

use std::collections::BTreeMap;
use std::fmt;

/// Identity of a cached read.
///
/// A key is the operation ID plus an ordered list of components: the route
/// parameters (sorted by name, so equal parameter sets always produce equal
/// keys) and, for list reads, the serialized query string. Two reads with the
/// same key are the same request and share one cache entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation_id: String,
    components: Vec<String>,
}

impl CacheKey {
    /// Creates a key from explicit components.
    #[must_use]
    pub fn new(operation_id: impl Into<String>, components: Vec<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            components,
        }
    }

    /// Key for a detail read: operation ID plus sorted route parameters.
    #[must_use]
    pub fn detail(operation_id: &str, params: &BTreeMap<String, String>) -> Self {
        Self {
            operation_id: operation_id.to_string(),
            components: params.iter().map(|(k, v)| format!("{k}={v}")).collect(),
        }
    }

    /// Key for a list read: the detail components plus the query string.
    ///
    /// The query string participates even when empty, so an unfiltered list
    /// and a filtered one never collide with a detail key.
    #[must_use]
    pub fn list(operation_id: &str, params: &BTreeMap<String, String>, query: &str) -> Self {
        let mut key = Self::detail(operation_id, params);
        key.components.push(format!("?{query}"));
        key
    }

    /// The operation ID this key belongs to.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation_id)?;
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_detail_keys_sort_params_by_name() {
        let a = CacheKey::detail("Products.Get", &params(&[("b", "2"), ("a", "1")]));
        let b = CacheKey::detail("Products.Get", &params(&[("a", "1"), ("b", "2")]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_params_produce_different_keys() {
        let a = CacheKey::detail("Products.Get", &params(&[("productID", "widget")]));
        let b = CacheKey::detail("Products.Get", &params(&[("productID", "gadget")]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_list_key_includes_query_string() {
        let route = params(&[]);
        let unfiltered = CacheKey::list("Products.List", &route, "");
        let filtered = CacheKey::list("Products.List", &route, "search=chair");
        assert_ne!(unfiltered, filtered);
    }

    #[test]
    fn test_list_key_never_collides_with_detail_key() {
        let route = params(&[("productID", "widget")]);
        let list = CacheKey::list("Products.Get", &route, "");
        let detail = CacheKey::detail("Products.Get", &route);
        assert_ne!(list, detail);
    }

    #[test]
    fn test_display_is_readable() {
        let key = CacheKey::list("Products.List", &params(&[("catalogID", "main")]), "page=2");
        assert_eq!(key.to_string(), "Products.List/catalogID=main/?page=2");
    }
}
