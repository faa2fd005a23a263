//! Wire types for the dereferenced OpenAPI document.
//!
//! Only the slice of the document this SDK consumes is modeled. Operation
//! objects are kept as raw JSON per verb and validated into the closed
//! [`Operation`](crate::spec::Operation) type at index-build time, so nothing
//! downstream ever touches a loosely-shaped value.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A dereferenced OpenAPI document, reduced to the fields the SDK reads.
///
/// Paths use `BTreeMap` so index construction iterates deterministically.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiDocument {
    /// Document metadata.
    #[serde(default)]
    pub info: DocumentInfo,
    /// Declared servers; the first entry's URL identifies the instance.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Path template → verb → raw operation object.
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl ApiDocument {
    /// Returns true when the declared version is the platform's 4-segment
    /// build version (e.g. `1.0.247.10421`), the only form the staleness
    /// probe can compare against a build number.
    #[must_use]
    pub fn has_build_version(&self) -> bool {
        self.info.version.split('.').count() == 4
    }
}

/// The OpenAPI `info` object.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocumentInfo {
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Declared API version string.
    #[serde(default)]
    pub version: String,
}

/// An OpenAPI `server` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    /// The server URL.
    pub url: String,
}

/// A raw operation object as it appears in the document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// The declared operation ID (e.g. `Products.List`).
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Declared parameters.
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    /// Request body schema, present for mutating operations.
    #[serde(default)]
    pub request_body: Option<serde_json::Value>,
    /// Response objects, kept raw; the index extracts item field names.
    #[serde(default)]
    pub responses: serde_json::Value,
    /// Resource tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Security requirements: scheme name → role list.
    #[serde(default)]
    pub security: Vec<BTreeMap<String, Vec<String>>>,
}

/// A raw parameter object.
#[derive(Clone, Debug, Deserialize)]
pub struct RawParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location (`path`, `query`, ...).
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
}

/// Response of the environment probe endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct BuildInfo {
    /// The currently served build number.
    #[serde(rename = "BuildNumber", default)]
    pub build_number: Option<String>,
}
