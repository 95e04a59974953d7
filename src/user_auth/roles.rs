//! Role-based routing hints and allowed-role sets.
//!
//! The destination table tells a freshly logged-in client where its UI
//! lives. Presentation-layer convenience only: authorization decisions
//! never read this table.

/// Destination lookup, in priority order. When an account holds more than
/// one of these roles, the earlier entry wins regardless of the order the
/// roles were granted in.
pub const ROLE_DESTINATIONS: &[(&str, &str)] = &[
    ("clerk", "http://localhost:8080/v1/list/"),
    ("nurse", "http://localhost:8686/v1/rooms/"),
];

/// Roles allowed through the clerk-only gate.
pub const CLERK_ONLY: &[&str] = &["clerk"];

/// Pick the destination for an account's role set.
///
/// Scans `ROLE_DESTINATIONS` in priority order and returns the first
/// destination whose role the account holds. Role sets with no known role
/// get no destination.
pub fn destination_for(roles: &[String]) -> Option<&'static str> {
    ROLE_DESTINATIONS
        .iter()
        .find(|(role, _)| roles.iter().any(|r| r == role))
        .map(|(_, destination)| *destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_set(roles: &[&str]) -> Vec<String> {
        roles.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_clerk_destination() {
        assert_eq!(
            destination_for(&role_set(&["clerk"])),
            Some("http://localhost:8080/v1/list/")
        );
    }

    #[test]
    fn test_nurse_destination() {
        assert_eq!(
            destination_for(&role_set(&["nurse"])),
            Some("http://localhost:8686/v1/rooms/")
        );
    }

    #[test]
    fn test_priority_independent_of_grant_order() {
        // clerk outranks nurse even when granted second
        assert_eq!(
            destination_for(&role_set(&["nurse", "clerk"])),
            Some("http://localhost:8080/v1/list/")
        );
    }

    #[test]
    fn test_unknown_roles_have_no_destination() {
        assert_eq!(destination_for(&role_set(&["surgeon"])), None);
        assert_eq!(destination_for(&[]), None);
    }
}
