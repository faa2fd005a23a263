//! URL routing and query serialization.
//!
//! [`build_request_url`] substitutes declared path parameters into an
//! operation's path template, and [`build_query_string`] serializes
//! [`ListOptions`] into the platform's query conventions.

use std::collections::BTreeMap;

use crate::spec::Operation;

/// Route parameters, sorted by name.
///
/// The ordering makes parameter sets canonical: the same parameters always
/// produce the same cache key regardless of insertion order.
pub type RouteParams = BTreeMap<String, String>;

/// Builds a [`RouteParams`] map from name/value pairs.
#[must_use]
pub fn route_params<const N: usize>(pairs: [(&str, &str); N]) -> RouteParams {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

/// Substitutes route parameters into an operation's path template.
///
/// Only parameters the operation declares in the path location are
/// substituted, and values are percent-encoded. Placeholders without a
/// matching parameter stay intact, and a `None` operation yields an empty
/// path; the caller decides whether that means "suppress the call".
#[must_use]
pub fn build_request_url(operation: Option<&Operation>, params: &RouteParams) -> String {
    let Some(operation) = operation else {
        return String::new();
    };

    let mut url = operation.path.clone();
    if !url.contains('{') {
        return url;
    }

    for (name, value) in params {
        if value.is_empty() || !operation.is_path_param(name) {
            continue;
        }
        url = url.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
    }
    url
}

/// A query string value.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    /// A plain string; empty strings are omitted from the query.
    Str(String),
    /// An integer; zero is serialized, not omitted.
    Int(i64),
    /// A boolean; `false` is serialized, not omitted.
    Bool(bool),
    /// A list of values. `searchOn` and `sortBy` join with commas, every
    /// other list joins with pipes. Empty lists are omitted.
    List(Vec<String>),
    /// Nested key/value pairs, flattened to `key=value` query parameters
    /// under their own names. Used for `filters`.
    Map(Vec<(String, String)>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Options serialized into a list request's query string.
///
/// Fields keep insertion order, so the serialized query is deterministic and
/// equal option sets produce equal cache keys.
///
/// # Example
///
/// ```rust
/// use commerce_api::rest::{build_query_string, ListOptions};
///
/// let options = ListOptions::new()
///     .search("chair")
///     .search_on(["Name", "Description"])
///     .page(2)
///     .filter("Active", "true");
///
/// assert_eq!(
///     build_query_string(&options),
///     "search=chair&searchOn=Name,Description&page=2&Active=true"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListOptions {
    fields: Vec<(String, QueryValue)>,
}

impl ListOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from plain string pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name, QueryValue::Str(value)))
                .collect(),
        }
    }

    /// Sets the full-text search term.
    #[must_use]
    pub fn search(self, term: impl Into<String>) -> Self {
        self.param("search", QueryValue::Str(term.into()))
    }

    /// Restricts the search to the named fields.
    #[must_use]
    pub fn search_on<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.param("searchOn", QueryValue::List(fields))
    }

    /// Sorts by the named fields, in order.
    #[must_use]
    pub fn sort_by<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.param("sortBy", QueryValue::List(fields))
    }

    /// Requests the given 1-based page.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("page", QueryValue::Int(i64::from(page)))
    }

    /// Sets the page size.
    #[must_use]
    pub fn page_size(self, size: u32) -> Self {
        self.param("pageSize", QueryValue::Int(i64::from(size)))
    }

    /// Adds a filter on the named item field.
    ///
    /// Filters accumulate into a single `filters` entry; each pair becomes
    /// its own `field=value` query parameter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (field.into(), value.into());
        if let Some((_, QueryValue::Map(pairs))) =
            self.fields.iter_mut().find(|(name, _)| name == "filters")
        {
            pairs.push(pair);
            return self;
        }
        self.fields
            .push(("filters".to_string(), QueryValue::Map(vec![pair])));
        self
    }

    /// Adds an arbitrary query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Returns true when no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The accumulated fields, in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, QueryValue)] {
        &self.fields
    }
}

/// Lists joined with commas rather than pipes.
const COMMA_JOINED: [&str; 2] = ["searchOn", "sortBy"];

/// Serializes options into a query string (without the leading `?`).
///
/// Empty strings, empty lists, and empty maps are omitted; numeric zero and
/// `false` are meaningful values and always serialize.
#[must_use]
pub fn build_query_string(options: &ListOptions) -> String {
    let chunks: Vec<String> = options
        .fields()
        .iter()
        .filter_map(|(name, value)| serialize_field(name, value))
        .collect();
    chunks.join("&")
}

fn serialize_field(name: &str, value: &QueryValue) -> Option<String> {
    match value {
        QueryValue::Str(s) => {
            if s.is_empty() {
                None
            } else {
                Some(format!("{name}={}", urlencoding::encode(s)))
            }
        }
        QueryValue::Int(n) => Some(format!("{name}={n}")),
        QueryValue::Bool(b) => Some(format!("{name}={b}")),
        QueryValue::List(items) => {
            if items.is_empty() {
                return None;
            }
            let separator = if COMMA_JOINED.contains(&name) { "," } else { "|" };
            let joined = items
                .iter()
                .map(|item| urlencoding::encode(item).into_owned())
                .collect::<Vec<_>>()
                .join(separator);
            Some(format!("{name}={joined}"))
        }
        QueryValue::Map(pairs) => {
            let chunks: Vec<String> = pairs
                .iter()
                .filter(|(key, value)| !key.is_empty() && !value.is_empty())
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect();
            if chunks.is_empty() {
                None
            } else {
                Some(chunks.join("&"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::spec::RawOperation;
    use serde_json::json;

    fn operation(path: &str, params: serde_json::Value) -> Operation {
        let raw: RawOperation = serde_json::from_value(json!({
            "operationId": "Products.Get",
            "parameters": params
        }))
        .unwrap();
        Operation::from_raw(&raw, HttpMethod::Get, path).unwrap()
    }

    #[test]
    fn test_substitutes_declared_path_params() {
        let op = operation(
            "/catalogs/{catalogID}/products/{productID}",
            json!([
                { "name": "catalogID", "in": "path", "required": true },
                { "name": "productID", "in": "path", "required": true }
            ]),
        );
        let url = build_request_url(
            Some(&op),
            &route_params([("catalogID", "main"), ("productID", "widget")]),
        );
        assert_eq!(url, "/catalogs/main/products/widget");
    }

    #[test]
    fn test_percent_encodes_values() {
        let op = operation(
            "/products/{productID}",
            json!([{ "name": "productID", "in": "path", "required": true }]),
        );
        let url = build_request_url(Some(&op), &route_params([("productID", "a b/c")]));
        assert_eq!(url, "/products/a%20b%2Fc");
    }

    #[test]
    fn test_undeclared_and_empty_params_leave_placeholders() {
        let op = operation(
            "/products/{productID}",
            json!([{ "name": "productID", "in": "path", "required": true }]),
        );

        let url = build_request_url(Some(&op), &route_params([("supplierID", "acme")]));
        assert_eq!(url, "/products/{productID}");

        let url = build_request_url(Some(&op), &route_params([("productID", "")]));
        assert_eq!(url, "/products/{productID}");
    }

    #[test]
    fn test_missing_operation_yields_empty_path() {
        assert_eq!(build_request_url(None, &RouteParams::new()), "");
    }

    #[test]
    fn test_query_serialization_conventions() {
        let options = ListOptions::new()
            .search("office chair")
            .search_on(["Name", "Description"])
            .sort_by(["!DateCreated"])
            .page(1)
            .page_size(20);

        assert_eq!(
            build_query_string(&options),
            "search=office%20chair&searchOn=Name,Description&sortBy=%21DateCreated&page=1&pageSize=20"
        );
    }

    #[test]
    fn test_filters_flatten_to_their_own_params() {
        let options = ListOptions::new()
            .filter("Active", "true")
            .filter("xp.Color", "red|blue");
        assert_eq!(build_query_string(&options), "Active=true&xp.Color=red%7Cblue");
    }

    #[test]
    fn test_generic_lists_join_with_pipes() {
        let options = ListOptions::new().param(
            "orderIDs",
            QueryValue::List(vec!["one".to_string(), "two".to_string()]),
        );
        assert_eq!(build_query_string(&options), "orderIDs=one%7Ctwo");
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let options = ListOptions::new()
            .search("")
            .search_on(Vec::<String>::new())
            .param("filters", QueryValue::Map(Vec::new()))
            .page(2);
        assert_eq!(build_query_string(&options), "page=2");
    }

    #[test]
    fn test_zero_and_false_are_serialized() {
        let options = ListOptions::new()
            .param("depth", QueryValue::Int(0))
            .param("includeInactive", QueryValue::Bool(false));
        assert_eq!(build_query_string(&options), "depth=0&includeInactive=false");
    }

    #[test]
    fn test_from_pairs_preserves_order() {
        let options = ListOptions::from_pairs(vec![
            ("buyerID".to_string(), "acme".to_string()),
            ("userID".to_string(), "jo".to_string()),
        ]);
        assert_eq!(build_query_string(&options), "buyerID=acme&userID=jo");
    }
}
