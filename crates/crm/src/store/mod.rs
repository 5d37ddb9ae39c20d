//! Local persistence: the key-value store and the typed entity stores.
//!
//! The KV layer stores one JSON document per key. Each entity store is a thin
//! typed facade over a fixed key; callers read the whole collection, mutate it
//! in memory, and write the whole collection back.

pub mod clients;
pub mod credentials;
pub mod kv;
pub mod products;
pub mod sales;

pub use clients::ClientDirectory;
pub use credentials::{CredentialVault, PasswordHash};
pub use kv::{LocalStore, StorageError};
pub use products::ProductCatalog;
pub use sales::SalesLedger;

/// Persisted document keys.
///
/// These are the stable identifiers of the store layout; renaming one orphans
/// existing data.
pub mod keys {
    /// Current session principal (single JSON object, absent when anonymous).
    pub const AUTH_USER: &str = "crm_auth_user_v1";

    /// Client directory (JSON array, most-recent-first).
    pub const CLIENTS: &str = "crm_clients_v1";

    /// Credential vault (JSON object, lowercased email -> password hash).
    pub const CLIENT_PASSWORDS: &str = "crm_client_passwords_v1";

    /// Product catalogs (JSON object, owner id -> product array).
    pub const PRODUCTS_BY_USER: &str = "crm_products_by_user";

    /// Sales ledgers (JSON object, owner id -> sale array).
    pub const SALES_BY_USER: &str = "crm_sales_by_user_v1";
}
