//! Clementine CRM - Application core.
//!
//! Everything the form layer needs, behind plain function calls:
//!
//! - [`store`] - The local key-value store and the typed entity stores built
//!   on top of it (client directory, credential vault, product catalogs,
//!   sales ledgers).
//! - [`services`] - Identity resolution against the hosted provider, the
//!   session manager, and the account/catalog/metrics services.
//! - [`models`] - Persisted record shapes and the resolved [`models::Principal`].
//! - [`validate`] - Field-level form validation.
//! - [`config`] - Environment-driven configuration.
//! - [`seed`] - Demo dataset installation.
//!
//! # Storage model
//!
//! All domain state lives in one JSON document per collection under a data
//! directory. Reads never fail: missing or corrupt documents degrade to empty
//! collections (logged, not surfaced) so a damaged store never blocks a
//! workflow. Writes replace whole documents; paired writes (a client record
//! and its credential, a stock decrement and its sale) go through a staged
//! batch so they commit together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;
pub mod validate;
