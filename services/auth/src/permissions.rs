//! Static role to permission table
//!
//! The table is fixed at compile time. Every role maps to its slice through
//! an exhaustive match, so adding a role without deciding its permissions is
//! a compile error rather than a silently empty grant.

use crate::models::{
    Action::{self, Create, Delete, Read, Update},
    Permission, Resource,
    Resource::{Client, Debt, Loan, Payment},
    Role,
};

const ADMIN: &[Permission] = &[
    Permission::allow(Create, Loan),
    Permission::allow(Read, Loan),
    Permission::allow(Update, Loan),
    Permission::allow(Delete, Loan),
    Permission::allow(Create, Client),
    Permission::allow(Read, Client),
    Permission::allow(Update, Client),
    Permission::allow(Delete, Client),
    Permission::allow(Create, Payment),
    Permission::allow(Read, Payment),
    Permission::allow(Update, Payment),
    Permission::allow(Delete, Payment),
    Permission::allow(Read, Debt),
    Permission::allow(Update, Debt),
];

const COLLECTOR: &[Permission] = &[
    Permission::allow(Create, Loan),
    Permission::allow(Read, Loan),
    Permission::allow(Update, Loan),
    Permission::allow(Read, Client),
    Permission::allow(Read, Payment),
    Permission::allow(Create, Payment),
];

const CLIENT: &[Permission] = &[
    Permission::allow(Read, Loan),
    Permission::allow(Read, Payment),
];

/// Get the permission entries declared for a role
pub const fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN,
        Role::Collector => COLLECTOR,
        Role::Client => CLIENT,
    }
}

/// Check whether `role` may perform `action` on `resource`
///
/// Only an exact, allowed (action, resource) entry grants access; holding
/// `update` does not imply `read`. No role means no access.
pub fn can(role: Option<Role>, action: Action, resource: Resource) -> bool {
    let Some(role) = role else {
        return false;
    };

    permissions_for(role)
        .iter()
        .any(|permission| permission.grants(action, resource))
}

/// Check a permission given by name, failing closed on any unknown name
pub fn can_named(role: Option<&str>, action: &str, resource: &str) -> bool {
    let role = role.and_then(|role| role.parse::<Role>().ok());
    match (action.parse::<Action>(), resource.parse::<Resource>()) {
        (Ok(action), Ok(resource)) => can(role, action, resource),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_decisions() {
        assert!(can(Some(Role::Admin), Delete, Loan));
        assert!(!can(Some(Role::Client), Create, Loan));
        assert!(!can(Some(Role::Collector), Delete, Loan));
    }

    #[test]
    fn test_no_role_is_always_denied() {
        for action in Action::ALL {
            for resource in Resource::ALL {
                assert!(!can(None, action, resource), "{action} {resource}");
            }
        }
    }

    #[test]
    fn test_closed_world() {
        for role in Role::ALL {
            for action in Action::ALL {
                for resource in Resource::ALL {
                    let declared = permissions_for(role)
                        .iter()
                        .any(|p| p.action == action && p.resource == resource && p.allowed);
                    assert_eq!(
                        can(Some(role), action, resource),
                        declared,
                        "{role} {action} {resource}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_denied_entry_does_not_grant() {
        let denied = Permission {
            allowed: false,
            ..Permission::allow(Read, Debt)
        };
        assert!(!denied.grants(Read, Debt));
    }

    #[test]
    fn test_no_implied_permissions() {
        // Admin may update debts and read them, collectors may do neither.
        assert!(can(Some(Role::Admin), Update, Debt));
        assert!(!can(Some(Role::Collector), Read, Debt));
        assert!(!can(Some(Role::Collector), Update, Client));
        assert!(!can(Some(Role::Admin), Create, Debt));
    }

    #[test]
    fn test_named_lookup_fails_closed() {
        assert!(can_named(Some("admin"), "delete", "loan"));
        assert!(can_named(Some("CLIENTE"), "read", "payment"));
        assert!(!can_named(Some("auditor"), "read", "loan"));
        assert!(!can_named(Some("admin"), "approve", "loan"));
        assert!(!can_named(Some("admin"), "read", "invoice"));
        assert!(!can_named(None, "read", "loan"));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(permissions_for(Role::Admin).len(), 14);
        assert_eq!(permissions_for(Role::Collector).len(), 6);
        assert_eq!(permissions_for(Role::Client).len(), 2);
    }
}
