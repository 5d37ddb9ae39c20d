//! Typed facade over the client directory document.

use crate::models::ClientRecord;

use super::keys;
use super::kv::{LocalStore, StorageError};

/// The admin-managed roster of client accounts.
///
/// A flat ordered list; insertion order is display order (new records are
/// prepended by the account service). Email uniqueness is the account
/// service's job, not the store's.
pub struct ClientDirectory<'a> {
    store: &'a LocalStore,
}

impl<'a> ClientDirectory<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Load the full roster. Missing or corrupt data reads as empty.
    #[must_use]
    pub fn load_all(&self) -> Vec<ClientRecord> {
        self.store.get(keys::CLIENTS).unwrap_or_default()
    }

    /// Replace the full roster, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save_all(&self, records: &[ClientRecord]) -> Result<(), StorageError> {
        self.store.set(keys::CLIENTS, &records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use clementine_core::{AccountStatus, Email, UserId};

    use super::*;

    fn record(id: &str, email: &str) -> ClientRecord {
        ClientRecord {
            id: UserId::new(id),
            name: format!("Client {id}"),
            email: Email::parse(email).unwrap(),
            phone: None,
            company: None,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let directory = ClientDirectory::new(&store);

        let records = vec![
            record("3", "c@x.com"),
            record("1", "a@x.com"),
            record("2", "b@x.com"),
        ];
        directory.save_all(&records).unwrap();
        assert_eq!(directory.load_all(), records);
    }

    #[test]
    fn test_missing_and_corrupt_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let directory = ClientDirectory::new(&store);

        assert!(directory.load_all().is_empty());

        std::fs::write(dir.path().join("crm_clients_v1.json"), "[{]").unwrap();
        assert!(directory.load_all().is_empty());
    }
}
