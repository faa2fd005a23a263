//! Client-side access control evaluation.
//!
//! These are boolean authorization decisions for UI gating only: the server
//! remains the authority and re-checks every request. Both rules are pure
//! functions of (assigned roles, requirement): no I/O, no side effects, which
//! keeps them unit-testable independent of any token machinery.

/// The role that satisfies every access check.
pub const FULL_ACCESS_ROLE: &str = "FullAccess";

/// Substring marking a role as administrative in scope.
const ADMIN_MARKER: &str = "Admin";

/// A required-role qualifier: a single role name, or a list of roles any one
/// of which grants access.
///
/// # Example
///
/// ```rust
/// use commerce_api::auth::AccessQualifier;
///
/// let single: AccessQualifier = "ProductAdmin".into();
/// let any_of: AccessQualifier = vec!["ProductAdmin".to_string(), "ProductReader".to_string()].into();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessQualifier {
    /// A single required role.
    Role(String),
    /// A list of alternatives; any element independently grants access.
    AnyOf(Vec<String>),
}

impl From<&str> for AccessQualifier {
    fn from(role: &str) -> Self {
        Self::Role(role.to_string())
    }
}

impl From<String> for AccessQualifier {
    fn from(role: String) -> Self {
        Self::Role(role)
    }
}

impl From<Vec<String>> for AccessQualifier {
    fn from(roles: Vec<String>) -> Self {
        Self::AnyOf(roles)
    }
}

impl From<&[String]> for AccessQualifier {
    fn from(roles: &[String]) -> Self {
        Self::AnyOf(roles.to_vec())
    }
}

/// Decides whether the caller's role set satisfies the qualifier.
///
/// Returns true when the caller holds [`FULL_ACCESS_ROLE`], or holds the
/// qualifier role, or (for a list qualifier) any element independently
/// satisfies the rule. An absent role set or an empty qualifier list yields
/// false.
///
/// # Example
///
/// ```rust
/// use commerce_api::auth::{is_allowed_access, AccessQualifier};
///
/// let roles = vec!["Shopper".to_string()];
/// assert!(is_allowed_access(Some(&roles), &"Shopper".into()));
/// assert!(!is_allowed_access(Some(&roles), &"ProductAdmin".into()));
/// assert!(!is_allowed_access(None, &"Shopper".into()));
/// ```
#[must_use]
pub fn is_allowed_access(assigned_roles: Option<&[String]>, qualifier: &AccessQualifier) -> bool {
    let Some(assigned) = assigned_roles else {
        return false;
    };

    if assigned.iter().any(|r| r == FULL_ACCESS_ROLE) {
        return true;
    }

    match qualifier {
        AccessQualifier::Role(role) => assigned.iter().any(|r| r == role),
        AccessQualifier::AnyOf(roles) => roles
            .iter()
            .any(|role| is_allowed_access(assigned_roles, &AccessQualifier::Role(role.clone()))),
    }
}

/// Decides whether the caller should be treated as an administrator of the
/// resource guarded by `operation_roles`.
///
/// Returns true when the caller holds [`FULL_ACCESS_ROLE`], or holds at least
/// one of the operation's declared roles whose name contains `Admin`.
///
/// # Example
///
/// ```rust
/// use commerce_api::auth::is_resource_admin;
///
/// let roles = vec!["ProductAdmin".to_string()];
/// let declared = vec!["ProductAdmin".to_string(), "ProductReader".to_string()];
/// assert!(is_resource_admin(Some(&roles), &declared));
///
/// let reader = vec!["ProductReader".to_string()];
/// assert!(!is_resource_admin(Some(&reader), &declared));
/// ```
#[must_use]
pub fn is_resource_admin(assigned_roles: Option<&[String]>, operation_roles: &[String]) -> bool {
    let Some(assigned) = assigned_roles else {
        return false;
    };

    if assigned.iter().any(|r| r == FULL_ACCESS_ROLE) {
        return true;
    }

    operation_roles
        .iter()
        .any(|role| role.contains(ADMIN_MARKER) && assigned.iter().any(|r| r == role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_full_access_satisfies_any_qualifier() {
        let assigned = roles(&["FullAccess"]);
        assert!(is_allowed_access(Some(&assigned), &"AnyRole".into()));
    }

    #[test]
    fn test_direct_role_match() {
        let assigned = roles(&["Shopper", "MeAddressAdmin"]);
        assert!(is_allowed_access(Some(&assigned), &"Shopper".into()));
    }

    #[test]
    fn test_missing_role_is_denied() {
        let assigned = roles(&["Shopper"]);
        assert!(!is_allowed_access(Some(&assigned), &"Admin".into()));
    }

    #[test]
    fn test_absent_role_set_is_denied() {
        assert!(!is_allowed_access(None, &"Admin".into()));
    }

    #[test]
    fn test_list_qualifier_matches_any_element() {
        let assigned = roles(&["OrderReader"]);
        let qualifier: AccessQualifier =
            roles(&["OrderAdmin", "OrderReader"]).into();
        assert!(is_allowed_access(Some(&assigned), &qualifier));
    }

    #[test]
    fn test_empty_list_qualifier_is_denied() {
        let assigned = roles(&["Shopper"]);
        let qualifier: AccessQualifier = Vec::<String>::new().into();
        assert!(!is_allowed_access(Some(&assigned), &qualifier));
    }

    #[test]
    fn test_resource_admin_requires_admin_suffixed_role() {
        let declared = roles(&["ProductAdmin", "ProductReader"]);

        let admin = roles(&["ProductAdmin"]);
        assert!(is_resource_admin(Some(&admin), &declared));

        let reader = roles(&["ProductReader"]);
        assert!(!is_resource_admin(Some(&reader), &declared));
    }

    #[test]
    fn test_resource_admin_full_access_override() {
        let assigned = roles(&["FullAccess"]);
        assert!(is_resource_admin(Some(&assigned), &[]));
    }

    #[test]
    fn test_resource_admin_absent_roles_denied() {
        let declared = roles(&["ProductAdmin"]);
        assert!(!is_resource_admin(None, &declared));
    }
}
