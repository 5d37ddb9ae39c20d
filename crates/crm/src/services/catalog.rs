//! Per-owner product catalog and the quick sale.
//!
//! Every operation here is scoped to one owner's partition. The quick sale
//! is the one cross-collection mutation in the system: it decrements stock
//! in the catalog and appends to the ledger, and those two writes commit in
//! one batch so a crash cannot record a sale without its stock decrement.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use clementine_core::{ProductId, SaleId, UserId};

use crate::models::{NewProduct, Product, ProductUpdate, Sale};
use crate::store::{LocalStore, ProductCatalog, SalesLedger, StorageError, keys};

/// Errors from catalog and sale operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Product CRUD and sale registration for one store.
pub struct CatalogService<'a> {
    store: &'a LocalStore,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// One owner's catalog, most-recent-first.
    #[must_use]
    pub fn list(&self, owner: &UserId) -> Vec<Product> {
        ProductCatalog::new(self.store).load(owner)
    }

    /// Look up one product in an owner's catalog.
    #[must_use]
    pub fn get(&self, owner: &UserId, id: &ProductId) -> Option<Product> {
        self.list(owner).into_iter().find(|p| &p.id == id)
    }

    /// Case-insensitive substring search over name and description.
    #[must_use]
    pub fn search(&self, owner: &UserId, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.list(owner)
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Add a product to the front of an owner's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the write fails.
    pub fn create(&self, owner: &UserId, input: NewProduct) -> Result<Product, CatalogError> {
        let catalog = ProductCatalog::new(self.store);
        let mut products = catalog.load(owner);

        let product = Product {
            id: ProductId::generate(),
            owner_id: owner.clone(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            image_url: input.image_url.filter(|u| !u.is_empty()),
            created_at: Utc::now(),
        };
        products.insert(0, product.clone());
        catalog.save(owner, &products)?;

        tracing::info!(id = %product.id, owner = %owner, "product created");
        Ok(product)
    }

    /// Merge changed fields into a product; its position is preserved.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ProductNotFound`] or [`CatalogError::Storage`].
    pub fn update(
        &self,
        owner: &UserId,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        let catalog = ProductCatalog::new(self.store);
        let mut products = catalog.load(owner);
        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            return Err(CatalogError::ProductNotFound);
        };

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = Some(image_url).filter(|u| !u.is_empty());
        }
        let updated = product.clone();

        catalog.save(owner, &products)?;
        tracing::info!(id = %updated.id, owner = %owner, "product updated");
        Ok(updated)
    }

    /// Remove a product from an owner's catalog.
    ///
    /// Historic sales referencing the product stay in the ledger with their
    /// snapshot totals.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ProductNotFound`] or [`CatalogError::Storage`].
    pub fn delete(&self, owner: &UserId, id: &ProductId) -> Result<(), CatalogError> {
        let catalog = ProductCatalog::new(self.store);
        let mut products = catalog.load(owner);
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Err(CatalogError::ProductNotFound);
        }

        catalog.save(owner, &products)?;
        tracing::info!(id = %id, owner = %owner, "product deleted");
        Ok(())
    }

    /// Register a quick sale against an owner's product.
    ///
    /// The total is a snapshot of `price * quantity` taken now; the stock
    /// decrement and the ledger append commit in one batch.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ProductNotFound`], [`CatalogError::InvalidQuantity`],
    /// [`CatalogError::InsufficientStock`], or [`CatalogError::Storage`].
    pub fn record_sale(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Sale, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity);
        }

        let mut product_map = ProductCatalog::new(self.store).load_map();
        let product = product_map
            .get_mut(owner)
            .and_then(|products| products.iter_mut().find(|p| &p.id == product_id))
            .ok_or(CatalogError::ProductNotFound)?;

        if quantity > product.stock {
            return Err(CatalogError::InsufficientStock {
                requested: quantity,
                available: product.stock,
            });
        }

        product.stock -= quantity;
        let sale = Sale {
            id: SaleId::generate(),
            product_id: product_id.clone(),
            quantity,
            total_amount: product.price * Decimal::from(quantity),
            created_at: Utc::now(),
        };

        let mut sales_map = SalesLedger::new(self.store).load_map();
        sales_map.entry(owner.clone()).or_default().push(sale.clone());

        self.store.write_batch(&[
            (keys::PRODUCTS_BY_USER, serde_json::to_value(&product_map).map_err(StorageError::from)?),
            (keys::SALES_BY_USER, serde_json::to_value(&sales_map).map_err(StorageError::from)?),
        ])?;

        tracing::info!(
            sale = %sale.id,
            product = %product_id,
            owner = %owner,
            quantity,
            "sale recorded"
        );
        Ok(sale)
    }

    /// One owner's ledger, oldest-first.
    #[must_use]
    pub fn sales(&self, owner: &UserId) -> Vec<Sale> {
        SalesLedger::new(self.store).load(owner)
    }
}
