//! Integration tests for identity resolution.
//!
//! The resolver has exactly two paths: the configured admin email goes to the
//! hosted provider and nowhere else, every other email goes to the local
//! directory and vault and never to the provider. The mock provider's call
//! counters make the "and nowhere else" half observable.

#![allow(clippy::unwrap_used)]

use clementine_core::Role;
use clementine_crm::services::{AccountService, IdentityResolver};

use clementine_integration_tests::{MockProvider, TestEnv, admin_identity, new_client};

const ADMIN_EMAIL: &str = "admin@crm.com";

#[tokio::test]
async fn test_admin_resolution_uses_provider_identity() {
    let env = TestEnv::new();
    let provider = MockProvider::accepting(admin_identity());
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);

    let principal = resolver.resolve(ADMIN_EMAIL, "hunter2").await.unwrap();

    assert_eq!(principal.id.as_str(), "admin-1");
    assert_eq!(principal.role, Role::Admin);
    assert_eq!(principal.name, "Administrator");
    assert_eq!(provider.verify_calls(), 1);
}

#[tokio::test]
async fn test_admin_resolution_ignores_local_records() {
    let env = TestEnv::new();

    // A directory record and vault credential under the admin email. If the
    // resolver ever fell back to local data, this password would log in.
    AccountService::new(&env.store)
        .create(new_client("Impostor", ADMIN_EMAIL, "local-password"))
        .unwrap();

    let provider = MockProvider::rejecting();
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);

    assert!(resolver.resolve(ADMIN_EMAIL, "local-password").await.is_err());
    assert_eq!(provider.verify_calls(), 1);
}

#[tokio::test]
async fn test_admin_email_is_matched_case_insensitively() {
    let env = TestEnv::new();
    let provider = MockProvider::accepting(admin_identity());
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);

    let principal = resolver.resolve("  Admin@CRM.com ", "hunter2").await.unwrap();

    assert_eq!(principal.role, Role::Admin);
    assert_eq!(provider.verify_calls(), 1);
}

#[tokio::test]
async fn test_client_resolution_never_contacts_provider() {
    let env = TestEnv::new();
    let record = AccountService::new(&env.store)
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "secret123"))
        .unwrap();

    let provider = MockProvider::rejecting();
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);

    let principal = resolver
        .resolve("Carlos@Empresa.com", "secret123")
        .await
        .unwrap();

    assert_eq!(principal.id, record.id);
    assert_eq!(principal.role, Role::Client);
    assert_eq!(principal.name, record.name);
    assert_eq!(provider.verify_calls(), 0);
}

#[tokio::test]
async fn test_client_failures_are_indistinguishable() {
    let env = TestEnv::new();
    AccountService::new(&env.store)
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "secret123"))
        .unwrap();

    let provider = MockProvider::rejecting();
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);

    let wrong_password = resolver
        .resolve("carlos@empresa.com", "nope")
        .await
        .unwrap_err();
    let unknown_email = resolver
        .resolve("nobody@empresa.com", "secret123")
        .await
        .unwrap_err();
    let garbage_email = resolver.resolve("not-an-email", "secret123").await.unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), garbage_email.to_string());
    assert_eq!(provider.verify_calls(), 0);
}
