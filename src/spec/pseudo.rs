//! Pseudo-resource definitions.
//!
//! Some nested endpoints are more useful surfaced as standalone resources
//! than under their parent. A [`PseudoResource`] names the paths to clone and
//! the token to strip from the source operation IDs, and the index registers
//! the cloned operations under the new resource name alongside the originals.

/// A declarative rule cloning operations under a new resource label.
#[derive(Clone, Debug)]
pub struct PseudoResource {
    /// Display name, e.g. `"Spec Options"`.
    pub name: String,
    /// Path templates whose operations are cloned.
    pub paths: Vec<String>,
    /// Token stripped from the verb segment of source operation IDs, e.g.
    /// `"Option"` turns `Specs.ListOptions` into `SpecOptions.List`.
    pub strip: String,
}

impl PseudoResource {
    /// Creates a pseudo-resource definition.
    pub fn new(
        name: impl Into<String>,
        strip: impl Into<String>,
        paths: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            paths: paths.into_iter().map(Into::into).collect(),
            strip: strip.into(),
        }
    }

    /// The resource identifier: the display name in PascalCase.
    #[must_use]
    pub fn resource_id(&self) -> String {
        self.name
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().collect::<String>() + chars.as_str()
                })
            })
            .collect()
    }

    /// Rewrites a source operation ID under this resource.
    ///
    /// `Specs.ListOptions` with strip token `Option` becomes
    /// `SpecOptions.List`. Returns `None` for IDs without a `.` separator.
    #[must_use]
    pub fn rewrite_operation_id(&self, source_id: &str) -> Option<String> {
        let (_, verb_segment) = source_id.split_once('.')?;
        let verb = verb_segment
            .split(self.strip.as_str())
            .next()
            .unwrap_or(verb_segment);
        Some(format!("{}.{verb}", self.resource_id()))
    }
}

/// The platform's standard pseudo-resources.
#[must_use]
pub fn default_pseudo_resources() -> Vec<PseudoResource> {
    vec![
        PseudoResource::new(
            "Spec Options",
            "Option",
            ["/specs/{specID}/options", "/specs/{specID}/options/{optionID}"],
        ),
        PseudoResource::new(
            "Shipment Items",
            "Item",
            [
                "/shipments/{shipmentID}/items",
                "/shipments/{shipmentID}/items/{orderID}/{lineItemID}",
            ],
        ),
        PseudoResource::new(
            "Order Shipments",
            "Shipment",
            ["/orders/{direction}/{orderID}/shipments"],
        ),
        PseudoResource::new(
            "Order Promotions",
            "Promotion",
            [
                "/orders/{direction}/{orderID}/promotions",
                "/orders/{direction}/{orderID}/promotions/{promoCode}",
            ],
        ),
        PseudoResource::new(
            "Order Approvers",
            "EligibleApprover",
            ["/orders/{direction}/{orderID}/eligibleapprovers"],
        ),
        PseudoResource::new(
            "Order Approvals",
            "Approval",
            ["/orders/{direction}/{orderID}/approvals"],
        ),
    ]
}
