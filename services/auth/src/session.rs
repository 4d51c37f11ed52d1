//! Signed-in user context

use tracing::info;

use crate::{
    models::{Action, Resource, Role, User},
    permissions,
};

/// Holds the current user, if any
///
/// Permission checks read the role of whoever is signed in at call time, so
/// signing out (or switching users) immediately changes every answer.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Create an empty, signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current user
    pub fn sign_in(&mut self, user: User) {
        info!(
            "Signed in user: {} (role: {})",
            user.username,
            user.role.map(|r| r.as_str()).unwrap_or("none")
        );
        self.user = Some(user);
    }

    /// Clear the current user
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Signed out user: {}", user.username);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role of the current user, `None` when signed out or the role is unknown
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|user| user.role)
    }

    /// Check a permission for whoever is currently signed in
    pub fn can(&self, action: Action, resource: Resource) -> bool {
        permissions::can(self.role(), action, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::EntityId;

    fn user(role: Option<Role>) -> User {
        User {
            id: EntityId::from(1),
            name: "Marta".to_string(),
            username: "marta".to_string(),
            phone: None,
            role,
            created_at: None,
        }
    }

    #[test]
    fn test_signed_out_session_denies_everything() {
        let session = Session::new();

        assert!(session.current_user().is_none());
        assert!(!session.can(Action::Read, Resource::Loan));
    }

    #[test]
    fn test_checks_follow_current_user() {
        let mut session = Session::new();

        session.sign_in(user(Some(Role::Collector)));
        assert!(session.can(Action::Create, Resource::Payment));
        assert!(!session.can(Action::Delete, Resource::Client));

        session.sign_in(user(Some(Role::Admin)));
        assert!(session.can(Action::Delete, Resource::Client));

        session.sign_out();
        assert!(!session.can(Action::Read, Resource::Loan));
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_unknown_role_is_denied() {
        let mut session = Session::new();
        session.sign_in(user(None));

        assert!(session.current_user().is_some());
        assert!(!session.can(Action::Read, Resource::Payment));
    }
}
