//! Integration tests for catalogs and quick sales.
//!
//! Catalogs and ledgers are per-owner partitions of shared documents, so the
//! interesting failure modes are cross-partition bleed and a sale committing
//! only half of its stock-decrement + ledger-append pair.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use clementine_core::UserId;
use clementine_crm::models::NewProduct;
use clementine_crm::services::{CatalogError, CatalogService};
use clementine_crm::store::keys;

use clementine_integration_tests::TestEnv;

fn laptop(stock: u32) -> NewProduct {
    NewProduct {
        name: "Laptop Pro X500".to_owned(),
        description: "High-end laptop for professional work".to_owned(),
        price: Decimal::new(25_999_99, 2),
        stock,
        image_url: None,
    }
}

#[test]
fn test_quick_sale_decrements_stock_and_appends_ledger() {
    let env = TestEnv::new();
    let owner = UserId::new("1");
    let catalog = CatalogService::new(&env.store);
    let product = catalog.create(&owner, laptop(15)).unwrap();

    let sale = catalog.record_sale(&owner, &product.id, 2).unwrap();

    assert_eq!(sale.quantity, 2);
    assert_eq!(sale.total_amount, Decimal::new(51_999_98, 2));
    assert_eq!(catalog.get(&owner, &product.id).unwrap().stock, 13);
    assert_eq!(catalog.sales(&owner), vec![sale]);
}

#[test]
fn test_sale_total_is_a_snapshot_of_the_price() {
    let env = TestEnv::new();
    let owner = UserId::new("1");
    let catalog = CatalogService::new(&env.store);
    let product = catalog.create(&owner, laptop(15)).unwrap();
    let sale = catalog.record_sale(&owner, &product.id, 1).unwrap();

    // Later price changes and even deletion leave the recorded total alone.
    catalog.delete(&owner, &product.id).unwrap();

    let sales = catalog.sales(&owner);
    assert_eq!(sales, vec![sale]);
    assert_eq!(
        sales.first().unwrap().total_amount,
        Decimal::new(25_999_99, 2)
    );
}

#[test]
fn test_rejected_sale_leaves_stock_and_ledger_untouched() {
    let env = TestEnv::new();
    let owner = UserId::new("1");
    let catalog = CatalogService::new(&env.store);
    let product = catalog.create(&owner, laptop(3)).unwrap();

    assert!(matches!(
        catalog.record_sale(&owner, &product.id, 0),
        Err(CatalogError::InvalidQuantity)
    ));
    assert!(matches!(
        catalog.record_sale(&owner, &product.id, 4),
        Err(CatalogError::InsufficientStock {
            requested: 4,
            available: 3
        })
    ));

    assert_eq!(catalog.get(&owner, &product.id).unwrap().stock, 3);
    assert!(catalog.sales(&owner).is_empty());
}

#[test]
fn test_partitions_are_isolated_between_owners() {
    let env = TestEnv::new();
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");
    let catalog = CatalogService::new(&env.store);

    let bobs = catalog.create(&bob, laptop(5)).unwrap();
    let bobs_before = catalog.list(&bob);

    // Everything Alice does stays in Alice's partitions.
    let alices = catalog.create(&alice, laptop(10)).unwrap();
    catalog.record_sale(&alice, &alices.id, 2).unwrap();
    catalog.delete(&alice, &alices.id).unwrap();

    assert_eq!(catalog.list(&bob), bobs_before);
    assert_eq!(catalog.get(&bob, &bobs.id).unwrap().stock, 5);
    assert!(catalog.sales(&bob).is_empty());
    assert_eq!(catalog.sales(&alice).len(), 1);
}

#[test]
fn test_corrupt_catalog_reads_empty_and_next_save_repairs() {
    let env = TestEnv::new();
    let owner = UserId::new("1");
    let catalog = CatalogService::new(&env.store);
    catalog.create(&owner, laptop(15)).unwrap();

    env.corrupt(keys::PRODUCTS_BY_USER);
    assert!(catalog.list(&owner).is_empty());

    // The next write starts from the empty collection and repairs the file.
    let replacement = catalog.create(&owner, laptop(7)).unwrap();
    assert_eq!(catalog.list(&owner), vec![replacement]);
}
