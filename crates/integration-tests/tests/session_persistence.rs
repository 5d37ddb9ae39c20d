//! Integration tests for session persistence across restarts.
//!
//! A restart is simulated by building a second session manager over the same
//! store. Restore must trust the persisted principal without contacting the
//! provider, and logout must be the only thing that ends a session.

#![allow(clippy::unwrap_used)]

use clementine_crm::services::{AccountService, IdentityResolver, SessionManager, SessionState};

use clementine_integration_tests::{MockProvider, TestEnv, admin_identity, new_client};

const ADMIN_EMAIL: &str = "admin@crm.com";

#[tokio::test]
async fn test_client_session_survives_restart_without_provider_call() {
    let env = TestEnv::new();
    AccountService::new(&env.store)
        .create(new_client("María González", "maria@tienda.mx", "secret123"))
        .unwrap();
    let provider = MockProvider::rejecting();

    let logged_in = {
        let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
        let mut session = SessionManager::new(&env.store, resolver);
        session.restore();
        session.login("maria@tienda.mx", "secret123").await.unwrap()
    };

    // New process: fresh manager, same store.
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
    let mut session = SessionManager::new(&env.store, resolver);

    assert_eq!(
        session.restore(),
        &SessionState::Authenticated(logged_in.clone())
    );
    assert_eq!(session.principal(), Some(&logged_in));
    assert_eq!(provider.verify_calls(), 0);
}

#[tokio::test]
async fn test_admin_session_survives_restart_without_provider_call() {
    let env = TestEnv::new();

    let logged_in = {
        let provider = MockProvider::accepting(admin_identity());
        let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
        let mut session = SessionManager::new(&env.store, resolver);
        session.restore();
        let principal = session.login(ADMIN_EMAIL, "hunter2").await.unwrap();
        assert_eq!(provider.verify_calls(), 1);
        principal
    };

    // After the restart even a dead provider cannot break the session.
    let provider = MockProvider::rejecting();
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
    let mut session = SessionManager::new(&env.store, resolver);

    assert_eq!(session.restore(), &SessionState::Authenticated(logged_in));
    assert_eq!(provider.verify_calls(), 0);
}

#[tokio::test]
async fn test_admin_logout_signs_out_provider_once() {
    let env = TestEnv::new();
    let provider = MockProvider::accepting(admin_identity());
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
    let mut session = SessionManager::new(&env.store, resolver);
    session.restore();
    session.login(ADMIN_EMAIL, "hunter2").await.unwrap();

    session.logout().await;

    assert_eq!(session.state(), &SessionState::Anonymous);
    assert_eq!(provider.sign_out_calls(), 1);

    // Already anonymous: nothing left to sign out.
    session.logout().await;
    assert_eq!(provider.sign_out_calls(), 1);
}

#[tokio::test]
async fn test_client_logout_never_contacts_provider() {
    let env = TestEnv::new();
    AccountService::new(&env.store)
        .create(new_client("María González", "maria@tienda.mx", "secret123"))
        .unwrap();
    let provider = MockProvider::rejecting();
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
    let mut session = SessionManager::new(&env.store, resolver);
    session.restore();
    session.login("maria@tienda.mx", "secret123").await.unwrap();

    session.logout().await;

    assert_eq!(session.state(), &SessionState::Anonymous);
    assert_eq!(provider.sign_out_calls(), 0);

    // And the logout is visible to the next process.
    let resolver = IdentityResolver::new(&env.store, &provider, ADMIN_EMAIL);
    let mut next = SessionManager::new(&env.store, resolver);
    assert_eq!(next.restore(), &SessionState::Anonymous);
}
