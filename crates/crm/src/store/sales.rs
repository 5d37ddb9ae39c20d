//! Typed facade over the by-owner sales ledger document.

use std::collections::BTreeMap;

use clementine_core::UserId;

use crate::models::Sale;

use super::keys;
use super::kv::{LocalStore, StorageError};

/// By-owner map of sale lists.
pub type SalesMap = BTreeMap<UserId, Vec<Sale>>;

/// Per-owner sales ledgers, all stored in one by-owner document.
///
/// Entries append at the tail (chronological order); the catalog service is
/// the only writer and never removes entries.
pub struct SalesLedger<'a> {
    store: &'a LocalStore,
}

impl<'a> SalesLedger<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Load one owner's ledger. Missing or corrupt data reads as empty.
    #[must_use]
    pub fn load(&self, owner: &UserId) -> Vec<Sale> {
        self.load_map().remove(owner).unwrap_or_default()
    }

    /// Load the full by-owner map, for cross-owner metrics.
    #[must_use]
    pub fn load_map(&self) -> SalesMap {
        self.store.get(keys::SALES_BY_USER).unwrap_or_default()
    }

    /// Replace one owner's ledger, leaving every other partition untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save(&self, owner: &UserId, sales: &[Sale]) -> Result<(), StorageError> {
        let mut map = self.load_map();
        map.insert(owner.clone(), sales.to_vec());
        self.store.set(keys::SALES_BY_USER, &map)
    }
}
