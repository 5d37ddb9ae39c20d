//! Persisted record shapes and the resolved principal.

pub mod activity;
pub mod client;
pub mod principal;
pub mod product;
pub mod sale;

pub use activity::{Activity, ActivityKind};
pub use client::{ClientRecord, ClientUpdate, NewClient};
pub use principal::Principal;
pub use product::{NewProduct, Product, ProductUpdate};
pub use sale::Sale;
