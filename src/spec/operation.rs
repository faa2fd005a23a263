//! Validated operation metadata.
//!
//! Raw OpenAPI operation objects are converted into [`Operation`] values at
//! index-build time. Everything the routing and cache layers need (verb,
//! path template, declared parameters, security roles, and the field names of
//! the items a list operation returns) is extracted here once.

use crate::clients::HttpMethod;
use crate::spec::document::RawOperation;

/// Where a declared parameter is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterLocation {
    /// Substituted into the path template.
    Path,
    /// Serialized into the query string.
    Query,
}

impl ParameterLocation {
    fn from_raw(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            _ => None,
        }
    }
}

/// A declared operation parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationParameter {
    /// Parameter name as it appears in the path template or query string.
    pub name: String,
    /// Binding location.
    pub location: ParameterLocation,
    /// Whether the document marks the parameter required.
    pub required: bool,
}

/// A single API operation, validated from the OpenAPI document.
#[derive(Clone, Debug)]
pub struct Operation {
    /// The operation ID, e.g. `Products.List` or `Me.GetProduct`.
    pub operation_id: String,
    /// The HTTP verb.
    pub verb: HttpMethod,
    /// The path template, e.g. `/products/{productID}`.
    pub path: String,
    /// Declared path and query parameters. Parameters in other locations
    /// (headers, cookies) are dropped; the SDK never binds them.
    pub parameters: Vec<OperationParameter>,
    /// Whether the document declares a request body.
    pub has_request_body: bool,
    /// Resource tags, used for pseudo-resource relabeling.
    pub tags: Vec<String>,
    /// Roles granted access by the first security requirement.
    pub security_roles: Vec<String>,
    /// Field names of the returned item (for list operations, the fields of
    /// one element of `Items`). Drives cache patching after deletes.
    pub item_fields: Vec<String>,
}

impl Operation {
    /// Validates a raw operation into an `Operation`.
    ///
    /// Returns `None` when the raw object carries no `operationId`; such
    /// entries cannot be addressed and are skipped by the index.
    #[must_use]
    pub fn from_raw(raw: &RawOperation, verb: HttpMethod, path: &str) -> Option<Self> {
        let operation_id = raw.operation_id.clone()?;

        let parameters = raw
            .parameters
            .iter()
            .filter_map(|p| {
                ParameterLocation::from_raw(&p.location).map(|location| OperationParameter {
                    name: p.name.clone(),
                    location,
                    required: p.required,
                })
            })
            .collect();

        let security_roles = raw
            .security
            .first()
            .map(|requirement| requirement.values().flatten().cloned().collect())
            .unwrap_or_default();

        Some(Self {
            operation_id,
            verb,
            path: path.to_string(),
            parameters,
            has_request_body: raw.request_body.is_some(),
            tags: raw.tags.clone(),
            security_roles,
            item_fields: extract_item_fields(&raw.responses),
        })
    }

    /// Returns true when `name` is a declared path parameter.
    #[must_use]
    pub fn is_path_param(&self, name: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.location == ParameterLocation::Path && p.name == name)
    }

    /// Returns the names of required path parameters, in declaration order.
    #[must_use]
    pub fn required_path_params(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path && p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Returns true when the returned item declares a field named `name`.
    #[must_use]
    pub fn has_item_field(&self, name: &str) -> bool {
        self.item_fields.iter().any(|f| f == name)
    }
}

/// Extracts the field names of the returned item from a raw `responses`
/// object.
///
/// For list operations the schema wraps items in
/// `properties.Items.items.properties`; detail operations declare the item's
/// properties directly. Missing or unrecognized schemas yield an empty list.
fn extract_item_fields(responses: &serde_json::Value) -> Vec<String> {
    let schema = ["200", "201"].iter().find_map(|status| {
        responses
            .get(status)?
            .get("content")?
            .get("application/json")?
            .get("schema")
    });

    let Some(schema) = schema else {
        return Vec::new();
    };

    let item_properties = schema
        .pointer("/properties/Items/items/properties")
        .or_else(|| schema.get("properties"));

    item_properties
        .and_then(serde_json::Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from(value: serde_json::Value) -> RawOperation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_raw_requires_operation_id() {
        let raw = raw_from(json!({ "tags": ["Products"] }));
        assert!(Operation::from_raw(&raw, HttpMethod::Get, "/products").is_none());
    }

    #[test]
    fn test_from_raw_extracts_parameters() {
        let raw = raw_from(json!({
            "operationId": "Products.Get",
            "parameters": [
                { "name": "productID", "in": "path", "required": true },
                { "name": "search", "in": "query" },
                { "name": "X-Trace", "in": "header" }
            ]
        }));

        let op = Operation::from_raw(&raw, HttpMethod::Get, "/products/{productID}").unwrap();
        assert_eq!(op.parameters.len(), 2);
        assert!(op.is_path_param("productID"));
        assert!(!op.is_path_param("search"));
        assert_eq!(op.required_path_params(), vec!["productID"]);
    }

    #[test]
    fn test_from_raw_extracts_security_roles() {
        let raw = raw_from(json!({
            "operationId": "Products.List",
            "security": [{ "OAuth2": ["ProductAdmin", "ProductReader"] }]
        }));

        let op = Operation::from_raw(&raw, HttpMethod::Get, "/products").unwrap();
        assert_eq!(op.security_roles, vec!["ProductAdmin", "ProductReader"]);
    }

    #[test]
    fn test_item_fields_from_list_schema() {
        let raw = raw_from(json!({
            "operationId": "Products.List",
            "responses": {
                "200": {
                    "content": {
                        "application/json": {
                            "schema": {
                                "properties": {
                                    "Items": {
                                        "items": {
                                            "properties": {
                                                "ID": {},
                                                "Name": {}
                                            }
                                        }
                                    },
                                    "Meta": {}
                                }
                            }
                        }
                    }
                }
            }
        }));

        let op = Operation::from_raw(&raw, HttpMethod::Get, "/products").unwrap();
        assert!(op.has_item_field("ID"));
        assert!(op.has_item_field("Name"));
        assert!(!op.has_item_field("Meta"));
    }

    #[test]
    fn test_item_fields_from_detail_schema() {
        let raw = raw_from(json!({
            "operationId": "Products.Get",
            "responses": {
                "200": {
                    "content": {
                        "application/json": {
                            "schema": {
                                "properties": { "ID": {}, "Description": {} }
                            }
                        }
                    }
                }
            }
        }));

        let op = Operation::from_raw(&raw, HttpMethod::Get, "/products/{productID}").unwrap();
        assert_eq!(op.item_fields, vec!["Description", "ID"]);
    }

    #[test]
    fn test_item_fields_empty_when_schema_missing() {
        let raw = raw_from(json!({ "operationId": "Products.Delete" }));
        let op = Operation::from_raw(&raw, HttpMethod::Delete, "/products/{productID}").unwrap();
        assert!(op.item_fields.is_empty());
    }

    #[test]
    fn test_request_body_flag() {
        let raw = raw_from(json!({
            "operationId": "Products.Create",
            "requestBody": { "content": {} }
        }));
        let op = Operation::from_raw(&raw, HttpMethod::Post, "/products").unwrap();
        assert!(op.has_request_body);
    }
}
