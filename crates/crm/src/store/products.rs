//! Typed facade over the by-owner product catalog document.

use std::collections::BTreeMap;

use clementine_core::UserId;

use crate::models::Product;

use super::keys;
use super::kv::{LocalStore, StorageError};

/// By-owner map of product lists.
pub type ProductMap = BTreeMap<UserId, Vec<Product>>;

/// Per-owner product catalogs, all stored in one by-owner document.
///
/// Saving one owner's list is a read-modify-write of the full map that
/// replaces only that owner's slot, so partitions stay isolated.
pub struct ProductCatalog<'a> {
    store: &'a LocalStore,
}

impl<'a> ProductCatalog<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Load one owner's catalog. Missing or corrupt data reads as empty.
    #[must_use]
    pub fn load(&self, owner: &UserId) -> Vec<Product> {
        self.load_map().remove(owner).unwrap_or_default()
    }

    /// Load the full by-owner map, for cross-owner metrics.
    #[must_use]
    pub fn load_map(&self) -> ProductMap {
        self.store.get(keys::PRODUCTS_BY_USER).unwrap_or_default()
    }

    /// Replace one owner's catalog, leaving every other partition untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save(&self, owner: &UserId, products: &[Product]) -> Result<(), StorageError> {
        let mut map = self.load_map();
        map.insert(owner.clone(), products.to_vec());
        self.store.set(keys::PRODUCTS_BY_USER, &map)
    }
}
