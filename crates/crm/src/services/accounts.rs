//! Admin roster management.
//!
//! A client account is a directory record plus a vault credential. The two
//! live under different keys, so every mutation that touches both goes
//! through one staged batch: a record can never exist without its credential
//! or the other way around.

use chrono::Utc;
use secrecy::ExposeSecret;
use thiserror::Error;

use clementine_core::{Email, UserId};

use crate::models::{ClientRecord, ClientUpdate, NewClient};
use crate::store::{ClientDirectory, CredentialVault, LocalStore, PasswordHash, StorageError, keys};

/// Errors from roster operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("client not found")]
    NotFound,

    #[error("email is already registered")]
    EmailTaken,

    #[error("password could not be hashed: {0}")]
    InvalidPassword(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Roster CRUD with record/credential coupling.
pub struct AccountService<'a> {
    store: &'a LocalStore,
}

impl<'a> AccountService<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// The full roster, most-recent-first.
    #[must_use]
    pub fn list(&self) -> Vec<ClientRecord> {
        ClientDirectory::new(self.store).load_all()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<ClientRecord> {
        self.list().into_iter().find(|r| &r.id == id)
    }

    /// First record whose email matches, case-insensitively.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<ClientRecord> {
        self.list()
            .into_iter()
            .find(|r| r.email.eq_ignore_case(email))
    }

    /// Case-insensitive substring search over name, email, and company.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<ClientRecord> {
        let needle = query.to_lowercase();
        self.list()
            .into_iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.email.normalized().as_str().contains(&needle)
                    || r.company
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Create an account: prepend the record and insert its credential in one
    /// batch.
    ///
    /// # Errors
    ///
    /// [`AccountError::EmailTaken`] if the email already appears in the
    /// directory or the vault; [`AccountError::InvalidPassword`] if hashing
    /// fails; [`AccountError::Storage`] if the commit fails.
    pub fn create(&self, input: NewClient) -> Result<ClientRecord, AccountError> {
        let mut records = ClientDirectory::new(self.store).load_all();
        let mut vault = CredentialVault::new(self.store).load();
        let email_key = input.email.normalized().into_inner();

        let taken = records
            .iter()
            .any(|r| r.email.eq_ignore_case(input.email.as_str()))
            || vault.contains_key(&email_key);
        if taken {
            return Err(AccountError::EmailTaken);
        }

        let hash = PasswordHash::from_plain(input.password.expose_secret())?;
        let record = ClientRecord {
            id: UserId::generate(),
            name: input.name,
            email: input.email,
            phone: input.phone.filter(|p| !p.is_empty()),
            company: input.company.filter(|c| !c.is_empty()),
            status: input.status,
            created_at: Utc::now(),
        };

        records.insert(0, record.clone());
        vault.insert(email_key, hash);
        self.commit(&records, &vault)?;

        tracing::info!(id = %record.id, "client account created");
        Ok(record)
    }

    /// Merge changed fields into a record.
    ///
    /// An email change re-checks uniqueness (excluding the record itself) and
    /// moves the vault credential from the old key to the new one in the same
    /// batch as the record write.
    ///
    /// # Errors
    ///
    /// [`AccountError::NotFound`], [`AccountError::EmailTaken`], or
    /// [`AccountError::Storage`].
    pub fn update(&self, id: &UserId, update: ClientUpdate) -> Result<ClientRecord, AccountError> {
        let mut records = ClientDirectory::new(self.store).load_all();
        let old_key = records
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.email.normalized().into_inner())
            .ok_or(AccountError::NotFound)?;

        let mut vault = CredentialVault::new(self.store).load();
        let mut email_moved = false;

        if let Some(new_email) = &update.email {
            let taken = records
                .iter()
                .any(|r| &r.id != id && r.email.eq_ignore_case(new_email.as_str()));
            if taken {
                return Err(AccountError::EmailTaken);
            }

            let new_key = new_email.normalized().into_inner();
            if old_key != new_key {
                if vault.contains_key(&new_key) {
                    return Err(AccountError::EmailTaken);
                }
                if let Some(hash) = vault.remove(&old_key) {
                    vault.insert(new_key, hash);
                }
                email_moved = true;
            }
        }

        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            return Err(AccountError::NotFound);
        };
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(phone) = update.phone {
            record.phone = Some(phone).filter(|p| !p.is_empty());
        }
        if let Some(company) = update.company {
            record.company = Some(company).filter(|c| !c.is_empty());
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        let updated = record.clone();

        if email_moved {
            self.commit(&records, &vault)?;
        } else {
            ClientDirectory::new(self.store).save_all(&records)?;
        }

        tracing::info!(id = %updated.id, "client account updated");
        Ok(updated)
    }

    /// Delete an account: the record and its credential go in one batch.
    ///
    /// # Errors
    ///
    /// [`AccountError::NotFound`] or [`AccountError::Storage`].
    pub fn delete(&self, id: &UserId) -> Result<(), AccountError> {
        let mut records = ClientDirectory::new(self.store).load_all();
        let position = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or(AccountError::NotFound)?;

        let removed = records.remove(position);
        let mut vault = CredentialVault::new(self.store).load();
        vault.remove(&removed.email.normalized().into_inner());
        self.commit(&records, &vault)?;

        tracing::info!(id = %removed.id, "client account deleted");
        Ok(())
    }

    fn commit(
        &self,
        records: &[ClientRecord],
        vault: &crate::store::credentials::CredentialMap,
    ) -> Result<(), StorageError> {
        self.store.write_batch(&[
            (keys::CLIENTS, serde_json::to_value(records)?),
            (keys::CLIENT_PASSWORDS, serde_json::to_value(vault)?),
        ])
    }
}
