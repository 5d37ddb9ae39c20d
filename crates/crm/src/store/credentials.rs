//! The credential vault: lowercased email -> password hash.
//!
//! Stored separately from the client directory. The source system kept
//! plaintext passwords here; this implementation stores salted bcrypt hashes
//! instead and never persists the plaintext form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys;
use super::kv::{LocalStore, StorageError};

/// A salted bcrypt hash of a client password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`bcrypt::BcryptError`] if hashing fails.
    pub fn from_plain(password: &str) -> Result<Self, bcrypt::BcryptError> {
        Ok(Self(bcrypt::hash(password, bcrypt::DEFAULT_COST)?))
    }

    /// Check a plaintext password against this hash.
    ///
    /// Any failure (mismatch, malformed stored hash) collapses to `false` so
    /// a corrupted vault entry behaves like a wrong password.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Credential map keyed by lowercased email.
pub type CredentialMap = BTreeMap<String, PasswordHash>;

/// Typed facade over the credential vault document.
pub struct CredentialVault<'a> {
    store: &'a LocalStore,
}

impl<'a> CredentialVault<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Load the full credential map. Missing or corrupt data reads as empty.
    #[must_use]
    pub fn load(&self) -> CredentialMap {
        self.store.get(keys::CLIENT_PASSWORDS).unwrap_or_default()
    }

    /// Replace the full credential map.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save(&self, map: &CredentialMap) -> Result<(), StorageError> {
        self.store.set(keys::CLIENT_PASSWORDS, map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_original_only() {
        let hash = PasswordHash::from_plain("secret123").unwrap();
        assert!(hash.verify("secret123"));
        assert!(!hash.verify("secret124"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = PasswordHash::from_plain("secret123").unwrap();
        let b = PasswordHash::from_plain("secret123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let hash = PasswordHash("not-a-bcrypt-hash".to_owned());
        assert!(!hash.verify("anything"));
    }

    #[test]
    fn test_vault_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let vault = CredentialVault::new(&store);

        assert!(vault.load().is_empty());

        let mut map = CredentialMap::new();
        map.insert(
            "j@x.com".to_owned(),
            PasswordHash::from_plain("secret123").unwrap(),
        );
        vault.save(&map).unwrap();
        assert_eq!(vault.load(), map);
    }
}
