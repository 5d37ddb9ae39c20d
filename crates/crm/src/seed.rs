//! Demo dataset installation.
//!
//! Installs the showcase dataset: four clients, a four-product catalog for
//! the first client, and ten sales against it. Seeding is explicit - stores
//! never fall back to demo data on their own - and replaces whatever the
//! seeded keys currently hold.

use chrono::{DateTime, Utc};
use thiserror::Error;

use clementine_core::{AccountStatus, Email, ProductId, SaleId, UserId};

use crate::models::{ClientRecord, Product, Sale};
use crate::store::credentials::CredentialMap;
use crate::store::{LocalStore, PasswordHash, StorageError, keys};

/// Errors from seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("demo password could not be hashed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub products: usize,
    pub sales: usize,
    pub credentials: usize,
}

/// Install the demo dataset, committing every document in one batch.
///
/// With `demo_password` set, each seeded client also gets a vault credential
/// for that password (hashed per client); without it the vault is left alone
/// and the seeded clients cannot log in until the admin sets credentials.
///
/// # Errors
///
/// Returns [`SeedError`] if hashing or the batch write fails.
pub fn install(store: &LocalStore, demo_password: Option<&str>) -> Result<SeedSummary, SeedError> {
    let clients = demo_clients();
    let owner = UserId::new("1");
    let products = demo_products(&owner);
    let sales = demo_sales();

    let product_map = std::collections::BTreeMap::from([(owner.clone(), products.clone())]);
    let sales_map = std::collections::BTreeMap::from([(owner, sales.clone())]);

    let mut entries = vec![
        (keys::CLIENTS, serde_json::to_value(&clients).map_err(StorageError::from)?),
        (keys::PRODUCTS_BY_USER, serde_json::to_value(&product_map).map_err(StorageError::from)?),
        (keys::SALES_BY_USER, serde_json::to_value(&sales_map).map_err(StorageError::from)?),
    ];

    let mut credentials = 0;
    if let Some(password) = demo_password {
        let mut vault = CredentialMap::new();
        for client in &clients {
            vault.insert(
                client.email.normalized().into_inner(),
                PasswordHash::from_plain(password)?,
            );
        }
        credentials = vault.len();
        entries.push((
            keys::CLIENT_PASSWORDS,
            serde_json::to_value(&vault).map_err(StorageError::from)?,
        ));
    }

    store.write_batch(&entries)?;
    tracing::info!(
        clients = clients.len(),
        products = products.len(),
        sales = sales.len(),
        credentials,
        "demo dataset installed"
    );

    Ok(SeedSummary {
        clients: clients.len(),
        products: products.len(),
        sales: sales.len(),
        credentials,
    })
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or_default()
}

#[allow(clippy::unwrap_used)] // literals below are known-valid
fn demo_clients() -> Vec<ClientRecord> {
    let client = |id: &str, name: &str, email: &str, phone: &str, company: &str, status, created| {
        ClientRecord {
            id: UserId::new(id),
            name: name.to_owned(),
            email: Email::parse(email).unwrap(),
            phone: Some(phone.to_owned()),
            company: Some(company.to_owned()),
            status,
            created_at: ts(created),
        }
    };

    vec![
        client(
            "1",
            "Carlos Rodríguez",
            "carlos@empresa.com",
            "+52 555 123 4567",
            "Tech Solutions SA",
            AccountStatus::Active,
            "2024-01-15T10:30:00Z",
        ),
        client(
            "2",
            "María García",
            "maria@comercio.mx",
            "+52 555 987 6543",
            "Comercio Digital MX",
            AccountStatus::Active,
            "2024-02-20T14:45:00Z",
        ),
        client(
            "3",
            "Juan Martínez",
            "juan@servicios.com",
            "+52 555 456 7890",
            "Servicios Integrales",
            AccountStatus::Inactive,
            "2024-03-10T09:15:00Z",
        ),
        client(
            "4",
            "Ana López",
            "ana@innovacion.tech",
            "+52 555 321 0987",
            "Innovación Tech",
            AccountStatus::Active,
            "2024-03-25T16:00:00Z",
        ),
    ]
}

#[allow(clippy::unwrap_used)] // literals below are known-valid
fn demo_products(owner: &UserId) -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: &str, stock, image: &str, created| {
        Product {
            id: ProductId::new(id),
            owner_id: owner.clone(),
            name: name.to_owned(),
            description: description.to_owned(),
            price: price.parse().unwrap(),
            stock,
            image_url: Some(image.to_owned()),
            created_at: ts(created),
        }
    };

    vec![
        product(
            "1",
            "Laptop Pro X500",
            "Laptop de alto rendimiento para profesionales",
            "25999.99",
            15,
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=400",
            "2024-01-20T10:00:00Z",
        ),
        product(
            "2",
            "Monitor UltraWide 34\"",
            "Monitor curvo para productividad",
            "8999.99",
            8,
            "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf?w=400",
            "2024-02-15T14:30:00Z",
        ),
        product(
            "3",
            "Teclado Mecánico RGB",
            "Teclado gaming con switches Cherry MX",
            "2499.99",
            25,
            "https://images.unsplash.com/photo-1511467687858-23d96c32e4ae?w=400",
            "2024-03-01T09:45:00Z",
        ),
        product(
            "4",
            "Mouse Ergonómico",
            "Mouse inalámbrico con diseño ergonómico",
            "899.99",
            42,
            "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=400",
            "2024-03-10T11:20:00Z",
        ),
    ]
}

#[allow(clippy::unwrap_used)] // literals below are known-valid
fn demo_sales() -> Vec<Sale> {
    let sale = |id: &str, product_id: &str, quantity, total: &str, created| Sale {
        id: SaleId::new(id),
        product_id: ProductId::new(product_id),
        quantity,
        total_amount: total.parse().unwrap(),
        created_at: ts(created),
    };

    vec![
        sale("1", "1", 2, "51999.98", "2024-12-01T10:30:00Z"),
        sale("2", "2", 1, "8999.99", "2024-12-02T14:15:00Z"),
        sale("3", "3", 5, "12499.95", "2024-12-03T09:00:00Z"),
        sale("4", "4", 3, "2699.97", "2024-12-04T16:45:00Z"),
        sale("5", "1", 1, "25999.99", "2024-12-05T11:30:00Z"),
        sale("6", "2", 2, "17999.98", "2024-12-06T13:20:00Z"),
        sale("7", "3", 8, "19999.92", "2024-12-07T10:00:00Z"),
        sale("8", "4", 6, "5399.94", "2024-12-08T15:30:00Z"),
        sale("9", "1", 3, "77999.97", "2024-12-09T09:45:00Z"),
        sale("10", "2", 1, "8999.99", "2024-12-10T14:00:00Z"),
    ]
}
