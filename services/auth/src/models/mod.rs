//! Authorization models

pub mod role;
pub mod user;

// Re-export for convenience
pub use role::{Action, ParseRoleError, Permission, Resource, Role};
pub use user::{NewUser, UpdateUser, User};
