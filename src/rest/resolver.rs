//! Operation resolution.
//!
//! Turns a resource name and an intent into an operation ID by convention
//! and looks it up in the index. A failed lookup is not an error: it means
//! the connected instance does not support that capability, and the resource
//! layer reports the call as disabled instead of issuing it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::rest::intent::ResourceIntent;
use crate::spec::{Operation, OperationIndex};

/// Prefix marking a resource as scoped to the authenticated user.
const ME_PREFIX: &str = "Me.";

/// Resolves resource names and intents to indexed operations.
#[derive(Clone, Debug)]
pub struct OperationResolver {
    index: Arc<OperationIndex>,
    /// Irregular singular forms, keyed by normalized resource name. The
    /// default singularization strips the trailing character, which is wrong
    /// for names like `Categories`.
    singular_overrides: HashMap<String, String>,
}

impl OperationResolver {
    /// Creates a resolver over the given index.
    #[must_use]
    pub fn new(index: Arc<OperationIndex>) -> Self {
        Self {
            index,
            singular_overrides: HashMap::new(),
        }
    }

    /// Registers an irregular singular form, e.g. `Categories` → `Category`.
    #[must_use]
    pub fn with_singular_override(
        mut self,
        resource: impl Into<String>,
        singular: impl Into<String>,
    ) -> Self {
        self.singular_overrides
            .insert(resource.into(), singular.into());
        self
    }

    /// Derives the operation ID for a resource and intent.
    ///
    /// Standard resources map to `{Name}.{Verb}`. Me-scoped resources
    /// (prefixed `Me.`) map to `Me.List{Name}` for lists and
    /// `Me.{Verb}{Singular}` otherwise. Assignment intents map to
    /// `{Name}.{Verb}{Inclusion}Assignment(s)` and ignore me-scoping.
    #[must_use]
    pub fn operation_id(
        &self,
        resource: &str,
        intent: ResourceIntent,
        inclusion: Option<&str>,
    ) -> String {
        let (me_scoped, raw_name) = match resource.strip_prefix(ME_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, resource),
        };
        let name = normalize_resource_name(raw_name);

        if intent.is_assignment() {
            let inclusion = inclusion.unwrap_or("");
            let plural = if intent == ResourceIntent::ListAssignments {
                "s"
            } else {
                ""
            };
            return format!("{name}.{}{inclusion}Assignment{plural}", intent.verb());
        }

        if me_scoped {
            return if intent == ResourceIntent::List {
                format!("Me.List{name}")
            } else {
                format!("Me.{}{}", intent.verb(), self.singularize(&name))
            };
        }

        format!("{name}.{}", intent.verb())
    }

    /// Resolves a resource and intent to an indexed operation.
    ///
    /// `None` means the instance does not expose the operation.
    #[must_use]
    pub fn resolve(
        &self,
        resource: &str,
        intent: ResourceIntent,
        inclusion: Option<&str>,
    ) -> Option<&Operation> {
        self.index.get(&self.operation_id(resource, intent, inclusion))
    }

    /// The index this resolver reads from.
    #[must_use]
    pub fn index(&self) -> &Arc<OperationIndex> {
        &self.index
    }

    fn singularize(&self, name: &str) -> String {
        self.singular_overrides.get(name).map_or_else(
            || {
                let mut singular = name.to_string();
                singular.pop();
                singular
            },
            Clone::clone,
        )
    }
}

/// Normalizes a resource name to the PascalCase form used in operation IDs.
///
/// Words may be separated by spaces, hyphens, or underscores; an
/// already-Pascal name passes through unchanged.
#[must_use]
pub fn normalize_resource_name(resource: &str) -> String {
    resource
        .split(&[' ', '-', '_'][..])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect()
}
