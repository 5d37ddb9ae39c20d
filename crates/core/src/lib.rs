//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine CRM components:
//! - `crm` - The application core: stores, identity resolution, sessions
//! - `cli` - Command-line front end for the admin and client workflows
//!
//! # Architecture
//!
//! The core crate contains only types and parsing - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
