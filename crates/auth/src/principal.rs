use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use warden_core::DomainError;

use crate::Role;

/// Separator used when roles are rendered into a token payload.
pub const ROLE_DELIMITER: char = ',';

/// An authenticated identity: username plus the roles it holds.
///
/// Immutable once built. Constructed either from a directory record during
/// login or from a signature-valid, unexpired token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(
        username: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }

        let roles: BTreeSet<Role> = roles.into_iter().collect();
        for role in &roles {
            if role.as_str().is_empty() {
                return Err(DomainError::validation("role name must not be empty"));
            }
            if role.as_str().contains(ROLE_DELIMITER) {
                return Err(DomainError::validation(format!(
                    "role name '{role}' contains the reserved delimiter '{ROLE_DELIMITER}'"
                )));
            }
        }

        Ok(Self { username, roles })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// True if the principal holds at least one of `required`.
    pub fn has_any_role<'a>(&self, required: impl IntoIterator<Item = &'a Role>) -> bool {
        required.into_iter().any(|r| self.roles.contains(r))
    }

    /// Roles in canonical (lexicographic) order joined by [`ROLE_DELIMITER`].
    pub fn joined_roles(&self) -> String {
        let mut out = String::new();
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                out.push(ROLE_DELIMITER);
            }
            out.push_str(role.as_str());
        }
        out
    }

    /// Inverse of [`Principal::joined_roles`]. Empty segments are ignored.
    pub fn split_roles(joined: &str) -> impl Iterator<Item = Role> + '_ {
        joined
            .split(ROLE_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Role::new(s.to_string()))
    }
}

/// Username/password pair presented at login. Transient; never persisted.
///
/// `Debug` redacts the password so the value can sit inside traced structs.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
