//! Integration tests for the admin roster.
//!
//! The invariant under test: a directory record and its vault credential
//! move together. Create inserts both, an email change moves the vault key,
//! delete removes both, and no operation can leave one without the other.

#![allow(clippy::unwrap_used)]

use clementine_crm::models::ClientUpdate;
use clementine_crm::services::{AccountError, AccountService};
use clementine_crm::store::{ClientDirectory, CredentialVault};

use clementine_integration_tests::{TestEnv, new_client};

#[test]
fn test_create_writes_record_and_credential_together() {
    let env = TestEnv::new();
    let service = AccountService::new(&env.store);

    let record = service
        .create(new_client("Carlos Rodríguez", "Carlos@Empresa.com", "secret123"))
        .unwrap();

    let directory = ClientDirectory::new(&env.store).load_all();
    assert_eq!(directory, vec![record]);

    // The vault key is the lowercased email, and the stored value is a hash,
    // not the password.
    let vault = CredentialVault::new(&env.store).load();
    let hash = vault.get("carlos@empresa.com").unwrap();
    assert_ne!(hash.as_str(), "secret123");
    assert!(hash.verify("secret123"));
    assert!(!hash.verify("secret124"));
}

#[test]
fn test_duplicate_email_is_rejected_case_insensitively() {
    let env = TestEnv::new();
    let service = AccountService::new(&env.store);
    service
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "secret123"))
        .unwrap();

    let err = service
        .create(new_client("Someone Else", "CARLOS@empresa.com", "other-pass"))
        .unwrap_err();

    assert!(matches!(err, AccountError::EmailTaken));
    assert_eq!(service.list().len(), 1);
    assert_eq!(CredentialVault::new(&env.store).load().len(), 1);
}

#[test]
fn test_update_email_moves_vault_credential() {
    let env = TestEnv::new();
    let service = AccountService::new(&env.store);
    let record = service
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "secret123"))
        .unwrap();

    let updated = service
        .update(
            &record.id,
            ClientUpdate {
                email: Some("carlos@nuevaempresa.com".parse().unwrap()),
                ..ClientUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.email.as_str(), "carlos@nuevaempresa.com");

    let vault = CredentialVault::new(&env.store).load();
    assert!(!vault.contains_key("carlos@empresa.com"));
    assert!(vault.get("carlos@nuevaempresa.com").unwrap().verify("secret123"));
}

#[test]
fn test_delete_removes_record_and_credential() {
    let env = TestEnv::new();
    let service = AccountService::new(&env.store);
    let keep = service
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "secret123"))
        .unwrap();
    let gone = service
        .create(new_client("María González", "maria@tienda.mx", "otro456"))
        .unwrap();

    service.delete(&gone.id).unwrap();

    assert_eq!(service.list(), vec![keep]);
    let vault = CredentialVault::new(&env.store).load();
    assert!(vault.contains_key("carlos@empresa.com"));
    assert!(!vault.contains_key("maria@tienda.mx"));
}

#[test]
fn test_roster_round_trips_most_recent_first() {
    let env = TestEnv::new();
    let service = AccountService::new(&env.store);
    let a = service
        .create(new_client("Ana Martínez", "ana@boutique.mx", "pass-a"))
        .unwrap();
    let b = service
        .create(new_client("Juan Pérez", "juan@comercio.mx", "pass-b"))
        .unwrap();
    let c = service
        .create(new_client("Carlos Rodríguez", "carlos@empresa.com", "pass-c"))
        .unwrap();

    let expected = vec![c, b, a];
    assert_eq!(service.list(), expected);

    // And the order survives a reload from disk.
    assert_eq!(ClientDirectory::new(&env.store).load_all(), expected);
}
