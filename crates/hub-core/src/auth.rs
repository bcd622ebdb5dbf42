//! Roles and authorization rules
//!
//! Permissions are stateless predicate functions over the closed [`Role`]
//! enum. They are evaluated fresh on every action; nothing caches a
//! permission decision across actions.

use serde::{Deserialize, Serialize};

/// Principal role
///
/// `Guest` is an ephemeral browsing principal with no backing account.
/// The other three are chosen by the user at registration time and never
/// elevated by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ephemeral, read-only principal
    Guest,
    /// Regular registered account
    User,
    /// May additionally create events
    Organizer,
    /// Full moderation rights
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        };
        f.write_str(s)
    }
}

/// Any authenticated (non-guest) principal may publish posts
pub fn can_create_post(role: Role) -> bool {
    match role {
        Role::Guest => false,
        Role::User | Role::Organizer | Role::Admin => true,
    }
}

/// Admins may delete any post; other authenticated principals only their own.
///
/// Ownership is compared by display name, matching the modeled system.
/// Two accounts sharing a display name can therefore delete each other's
/// posts; see DESIGN.md before "fixing" this.
pub fn can_delete_post(role: Role, actor_name: &str, author_name: &str) -> bool {
    match role {
        Role::Admin => true,
        Role::Guest => false,
        Role::User | Role::Organizer => actor_name == author_name,
    }
}

/// Only organizers create events
pub fn can_create_event(role: Role) -> bool {
    match role {
        Role::Organizer => true,
        Role::Guest | Role::User | Role::Admin => false,
    }
}

/// Any authenticated principal may join an event
pub fn can_join_event(role: Role) -> bool {
    match role {
        Role::Guest => false,
        Role::User | Role::Organizer | Role::Admin => true,
    }
}

/// Any authenticated principal may add a learning resource
pub fn can_add_resource(role: Role) -> bool {
    match role {
        Role::Guest => false,
        Role::User | Role::Organizer | Role::Admin => true,
    }
}

/// Ban toggling and the moderation panel are admin-only
pub fn can_moderate(role: Role) -> bool {
    match role {
        Role::Admin => true,
        Role::Guest | Role::User | Role::Organizer => false,
    }
}

/// Every role may (re)select hobbies; guests just never persist them
pub fn can_select_hobbies(role: Role) -> bool {
    match role {
        Role::Guest | Role::User | Role::Organizer | Role::Admin => true,
    }
}
