//! Collaborator contracts consumed by the authenticator.
//!
//! Storage and hashing live behind these traits. The in-memory directory and
//! the Argon2 verifier are the implementations the host binary wires up.

use std::collections::{BTreeSet, HashMap};
use std::sync::{LazyLock, RwLock};

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use warden_core::UserId;

use crate::Role;

/// A user as held by the directory. Read-only from this crate's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default = "default_activated")]
    pub activated: bool,
}

fn default_activated() -> bool {
    true
}

/// Username → user record lookup.
pub trait UserDirectory: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;
}

/// Confirms a plaintext password against a stored hash.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    SaltString::from_b64("ZHVtbXlkdW1teWR1bW15ZA")
        .and_then(|salt| {
            Argon2::default()
                .hash_password(b"warden-unmatched-password", &salt)
                .map(|hash| hash.to_string())
        })
        .unwrap_or_default()
});

/// Argon2 hash (default parameters) that no real login is expected to match.
///
/// Login verifies against it when the username is unknown, so a miss in the
/// directory costs the same as a wrong password.
pub fn dummy_password_hash() -> &'static str {
    &DUMMY_HASH
}

/// Process-local directory, seeded at startup.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let dir = Self::new();
        for user in users {
            dir.insert(user);
        }
        dir
    }

    /// Parse a JSON array of [`UserRecord`]s.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let users: Vec<UserRecord> = serde_json::from_str(json)?;
        Ok(Self::with_users(users))
    }

    /// Insert or replace the record keyed by its username.
    pub fn insert(&self, user: UserRecord) {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user.username.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(username)
            .cloned()
    }
}

/// Verifies Argon2 hashes in PHC string format (`$argon2id$v=19$...`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => {
                tracing::warn!("stored password hash is not a valid PHC string");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use argon2::password_hash::{PasswordHasher, SaltString};
    use argon2::{Algorithm, Argon2, Params, Version};

    /// Hash with a fixed salt and minimal cost; tests only.
    ///
    /// Verification reads the parameters back out of the PHC string, so the
    /// production verifier accepts these hashes unchanged.
    pub fn hash(password: &str) -> String {
        let salt = SaltString::from_b64("c2FsdHNhbHRzYWx0c2FsdA").unwrap();
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }
}
