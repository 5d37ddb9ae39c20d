//! Integration test harness for Clementine CRM.
//!
//! The whole system runs against a local file store, so these tests need no
//! external services: each test gets a throwaway store in a temp directory
//! and an in-process stand-in for the hosted identity provider.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clementine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `identity_resolution` - admin/client resolution paths
//! - `session_persistence` - session restore across restarts
//! - `accounts_roster` - record/credential coupling
//! - `catalog_sales` - quick sales, partitioning, corruption tolerance

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use tempfile::TempDir;

use clementine_core::{AccountStatus, Email, UserId};
use clementine_crm::models::NewClient;
use clementine_crm::services::identity::{IdentityProvider, ProviderError, VerifiedIdentity};
use clementine_crm::store::LocalStore;

/// A throwaway store rooted in a temp directory.
///
/// The directory is removed when the env is dropped.
pub struct TestEnv {
    pub store: LocalStore,
    dir: TempDir,
}

impl TestEnv {
    /// # Panics
    ///
    /// Panics if the temp directory or the store cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LocalStore::open(dir.path()).expect("local store");
        Self { store, dir }
    }

    /// The directory backing the store, for tests that corrupt files.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Overwrite a store document with garbage bytes.
    ///
    /// # Panics
    ///
    /// Panics if the write fails.
    pub fn corrupt(&self, key: &str) {
        std::fs::write(self.path().join(format!("{key}.json")), b"{not json")
            .expect("corrupt store file");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process identity provider that counts its calls.
///
/// `accepting` always verifies to the given identity; `rejecting` answers
/// every verification with an API error, the way the hosted provider answers
/// a wrong password.
pub struct MockProvider {
    identity: Option<VerifiedIdentity>,
    verify_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl MockProvider {
    #[must_use]
    pub const fn accepting(identity: VerifiedIdentity) -> Self {
        Self {
            identity: Some(identity),
            verify_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn rejecting() -> Self {
        Self {
            identity: None,
            verify_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// How many times `verify_credentials` was called.
    #[must_use]
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// How many times `sign_out` was called.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn verify_credentials(
        &self,
        _email: &Email,
        _password: &str,
    ) -> Result<VerifiedIdentity, ProviderError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.identity.clone().ok_or(ProviderError::Api {
            status: 400,
            message: "invalid grant".to_owned(),
        })
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// The identity the mock provider vouches for in admin-path tests.
///
/// # Panics
///
/// Panics if the fixture timestamp or email is malformed (it is not).
#[must_use]
pub fn admin_identity() -> VerifiedIdentity {
    VerifiedIdentity {
        id: UserId::new("admin-1"),
        email: Some(Email::parse("admin@crm.com").expect("fixture email")),
        display_name: Some("Administrator".to_owned()),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("fixture timestamp"),
    }
}

/// A minimal active-client creation input.
///
/// # Panics
///
/// Panics if `email` does not parse.
#[must_use]
pub fn new_client(name: &str, email: &str, password: &str) -> NewClient {
    NewClient {
        name: name.to_owned(),
        email: Email::parse(email).expect("fixture email"),
        phone: None,
        company: None,
        status: AccountStatus::Active,
        password: SecretString::from(password.to_owned()),
    }
}
