//! The operation index.
//!
//! Flattens an [`ApiDocument`] into a lookup table keyed by operation ID and
//! layers in pseudo-resource clones. Building the index is the only place
//! raw document JSON is interpreted; afterwards every lookup is a plain map
//! read.

use std::collections::HashMap;

use crate::clients::HttpMethod;
use crate::spec::document::ApiDocument;
use crate::spec::operation::Operation;
use crate::spec::pseudo::PseudoResource;

/// Lookup table of validated operations, keyed by operation ID.
///
/// An empty index is a valid state: every lookup misses, and the resource
/// layer treats the miss as "capability unsupported" rather than an error.
#[derive(Debug, Default)]
pub struct OperationIndex {
    operations: HashMap<String, Operation>,
    version: String,
}

impl OperationIndex {
    /// Creates an empty index, used before any document has been loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an index from a document and a set of pseudo-resource rules.
    ///
    /// Operations without an `operationId` and verb keys outside the
    /// supported set are skipped. Duplicate IDs resolve last-write-wins with
    /// a warning; document paths iterate in sorted order so the outcome is
    /// deterministic.
    #[must_use]
    pub fn build(document: &ApiDocument, pseudo_resources: &[PseudoResource]) -> Self {
        let mut index = Self {
            operations: HashMap::new(),
            version: document.info.version.clone(),
        };

        for (path, verbs) in &document.paths {
            for (verb_key, raw_value) in verbs {
                let Some(verb) = HttpMethod::from_verb(verb_key) else {
                    continue;
                };
                let Ok(raw) = serde_json::from_value(raw_value.clone()) else {
                    tracing::warn!(%path, verb = %verb, "malformed operation object skipped");
                    continue;
                };
                if let Some(operation) = Operation::from_raw(&raw, verb, path) {
                    index.insert(operation);
                }
            }
        }

        for pseudo in pseudo_resources {
            index.register_pseudo_resource(document, pseudo);
        }

        index
    }

    /// Clones the operations under `pseudo.paths` with rewritten IDs and a
    /// single tag naming the pseudo-resource.
    fn register_pseudo_resource(&mut self, document: &ApiDocument, pseudo: &PseudoResource) {
        for path in &pseudo.paths {
            let Some(verbs) = document.paths.get(path) else {
                tracing::warn!(
                    resource = %pseudo.name,
                    %path,
                    "pseudo-resource path not in document, skipped"
                );
                continue;
            };

            let mut clones = Vec::new();
            for (verb_key, raw_value) in verbs {
                let Some(verb) = HttpMethod::from_verb(verb_key) else {
                    continue;
                };
                let Ok(raw) = serde_json::from_value(raw_value.clone()) else {
                    continue;
                };
                let Some(source) = Operation::from_raw(&raw, verb, path) else {
                    continue;
                };
                let Some(operation_id) = pseudo.rewrite_operation_id(&source.operation_id) else {
                    tracing::warn!(
                        resource = %pseudo.name,
                        source = %source.operation_id,
                        "pseudo-resource source operation has no rewritable ID, skipped"
                    );
                    continue;
                };

                let mut clone = source;
                clone.operation_id = operation_id;
                clone.tags = vec![pseudo.name.clone()];
                clones.push(clone);
            }

            for clone in clones {
                self.insert(clone);
            }
        }
    }

    fn insert(&mut self, operation: Operation) {
        if let Some(previous) = self
            .operations
            .insert(operation.operation_id.clone(), operation)
        {
            tracing::warn!(
                operation_id = %previous.operation_id,
                "duplicate operation ID, keeping the later definition"
            );
        }
    }

    /// Looks up an operation by ID.
    #[must_use]
    pub fn get(&self, operation_id: &str) -> Option<&Operation> {
        self.operations.get(operation_id)
    }

    /// Returns true when `operation_id` is indexed.
    #[must_use]
    pub fn contains(&self, operation_id: &str) -> bool {
        self.operations.contains_key(operation_id)
    }

    /// The version string of the source document (empty for [`empty`]).
    ///
    /// [`empty`]: Self::empty
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of indexed operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true when no operations are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
