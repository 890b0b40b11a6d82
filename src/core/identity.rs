//! User directory and credential check.
//!
//! The portal authenticates against a fixed list of accounts sharing one
//! password. This is a stand-in for a real credential system and is not
//! meant to be hardened.

use super::role::Role;
use serde::{Deserialize, Serialize};

/// The password every directory account accepts.
pub const DEMO_PASSWORD: &str = "password";

/// An authenticated portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory id
    pub id: String,
    /// Display name, also recorded as requester / library user name
    pub name: String,
    /// Login email
    pub email: String,
    /// Authorization role
    pub role: Role,
}

impl User {
    /// Shorthand for `self.role.is_admin()`.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

struct DirectoryEntry {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    role: Role,
}

const DIRECTORY: [DirectoryEntry; 3] = [
    DirectoryEntry {
        id: "1",
        name: "John Finance",
        email: "finance@company.com",
        role: Role::Finance,
    },
    DirectoryEntry {
        id: "2",
        name: "Sarah Procurement",
        email: "procurement@company.com",
        role: Role::Procurement,
    },
    DirectoryEntry {
        id: "3",
        name: "Admin SP",
        email: "admin@sevenprocure.com",
        role: Role::SevenProcure,
    },
];

impl DirectoryEntry {
    fn to_user(&self) -> User {
        User {
            id: self.id.to_string(),
            name: self.name.to_string(),
            email: self.email.to_string(),
            role: self.role,
        }
    }
}

/// Every account in the directory.
#[must_use]
pub fn directory() -> Vec<User> {
    DIRECTORY.iter().map(DirectoryEntry::to_user).collect()
}

/// Finds the account with exactly this email.
#[must_use]
pub fn find_user_by_email(email: &str) -> Option<User> {
    DIRECTORY
        .iter()
        .find(|entry| entry.email == email)
        .map(DirectoryEntry::to_user)
}

/// Returns the user when the email is known and the password matches.
#[must_use]
pub fn authenticate(email: &str, password: &str) -> Option<User> {
    find_user_by_email(email).filter(|_| password == DEMO_PASSWORD)
}
