//! Resource operation intents.

/// What a caller wants to do to a resource.
///
/// Intents map onto operation IDs by convention: `{Resource}.{Verb}` for
/// standard operations, `Me.{Verb}{Singular}` for me-scoped resources, and
/// `{Resource}.{Verb}{Inclusion}Assignment(s)` for assignment operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceIntent {
    /// List a page of items.
    List,
    /// Fetch one item.
    Get,
    /// Create a new item.
    Create,
    /// Create or update an item.
    Save,
    /// Delete an item.
    Delete,
    /// List assignments for an inclusion.
    ListAssignments,
    /// Create or update an assignment.
    SaveAssignment,
    /// Delete an assignment.
    DeleteAssignment,
}

impl ResourceIntent {
    /// The verb segment used when deriving the operation ID.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::List | Self::ListAssignments => "List",
            Self::Get => "Get",
            Self::Create => "Create",
            Self::Save | Self::SaveAssignment => "Save",
            Self::Delete | Self::DeleteAssignment => "Delete",
        }
    }

    /// Returns true for the assignment intents.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::ListAssignments | Self::SaveAssignment | Self::DeleteAssignment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_segments() {
        assert_eq!(ResourceIntent::List.verb(), "List");
        assert_eq!(ResourceIntent::Save.verb(), "Save");
        assert_eq!(ResourceIntent::SaveAssignment.verb(), "Save");
        assert_eq!(ResourceIntent::DeleteAssignment.verb(), "Delete");
    }

    #[test]
    fn test_assignment_classification() {
        assert!(ResourceIntent::ListAssignments.is_assignment());
        assert!(!ResourceIntent::List.is_assignment());
    }
}
