//! Command implementations.
//!
//! Every command opens the same application context: config from the
//! environment, the local store under the configured data directory, and the
//! hosted identity client. The session persists across invocations through
//! the store, so `login` in one process is visible to `whoami` in the next.

pub mod clients;
pub mod dashboard;
pub mod products;
pub mod sales;
pub mod seed;
pub mod session;

use thiserror::Error;

use clementine_core::UserId;
use clementine_crm::config::{ConfigError, CrmConfig};
use clementine_crm::models::Principal;
use clementine_crm::services::identity::{
    HostedIdentityClient, IdentityResolver, ProviderError,
};
use clementine_crm::services::{AuthError, SessionManager, SessionState};
use clementine_crm::store::{LocalStore, StorageError};
use clementine_crm::validate::FieldError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Account(#[from] clementine_crm::services::AccountError),

    #[error(transparent)]
    Catalog(#[from] clementine_crm::services::CatalogError),

    #[error(transparent)]
    Seed(#[from] clementine_crm::seed::SeedError),

    /// One or more form fields failed validation.
    #[error("invalid input: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("not logged in; run `clem-cli login` first")]
    NotAuthenticated,

    #[error("admin session has no catalog; pass --owner <client-id>")]
    OwnerRequired,

    #[error("--owner is an admin flag; clients operate on their own catalog")]
    AdminRequired,
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fail on any collected validation errors.
pub fn require_valid(errors: Vec<FieldError>) -> Result<(), CliError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::Validation(errors))
    }
}

/// Everything a command needs.
pub struct Context {
    pub config: CrmConfig,
    pub store: LocalStore,
    pub provider: HostedIdentityClient,
}

impl Context {
    /// Load config and open the store and provider client.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if config loading, store opening, or provider
    /// construction fails.
    pub fn open() -> Result<Self, CliError> {
        let config = CrmConfig::from_env()?;
        let store = LocalStore::open(&config.data_dir)?;
        let provider = HostedIdentityClient::new(&config.identity)?;
        Ok(Self {
            config,
            store,
            provider,
        })
    }

    /// A session manager over this context, restored from the store.
    pub fn session(&self) -> SessionManager<'_> {
        let resolver = IdentityResolver::new(&self.store, &self.provider, &self.config.admin_email);
        let mut session = SessionManager::new(&self.store, resolver);
        session.restore();
        session
    }

    /// The restored principal, or `NotAuthenticated`.
    pub fn current_principal(&self) -> Result<Principal, CliError> {
        let mut session = self.session();
        match session.restore() {
            SessionState::Authenticated(principal) => Ok(principal.clone()),
            SessionState::Unresolved | SessionState::Anonymous => Err(CliError::NotAuthenticated),
        }
    }

    /// Which catalog owner a command operates on.
    ///
    /// Always requires a restored principal. A client principal owns its own
    /// partition and may not name another; the admin has no partition and
    /// must name one with `--owner`.
    pub fn resolve_owner(&self, owner_flag: Option<&str>) -> Result<UserId, CliError> {
        let principal = self.current_principal()?;
        owner_for(&principal, owner_flag)
    }
}

fn owner_for(principal: &Principal, owner_flag: Option<&str>) -> Result<UserId, CliError> {
    match owner_flag {
        Some(owner) => {
            if principal.is_admin() {
                Ok(UserId::new(owner))
            } else {
                Err(CliError::AdminRequired)
            }
        }
        None => {
            if principal.is_admin() {
                Err(CliError::OwnerRequired)
            } else {
                Ok(principal.id.clone())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use clementine_core::{AccountStatus, Email, Role};

    use super::*;

    fn principal(id: &str, role: Role) -> Principal {
        Principal {
            id: UserId::new(id),
            name: "Carlos Rodríguez".to_owned(),
            email: Email::parse("carlos@empresa.com").unwrap(),
            role,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_client_operates_on_its_own_partition() {
        let client = principal("1", Role::Client);
        assert_eq!(owner_for(&client, None).unwrap(), UserId::new("1"));
    }

    #[test]
    fn test_client_cannot_name_another_owner() {
        let client = principal("1", Role::Client);
        assert!(matches!(
            owner_for(&client, Some("2")),
            Err(CliError::AdminRequired)
        ));
    }

    #[test]
    fn test_admin_must_name_an_owner() {
        let admin = principal("admin-1", Role::Admin);
        assert!(matches!(owner_for(&admin, None), Err(CliError::OwnerRequired)));
        assert_eq!(owner_for(&admin, Some("2")).unwrap(), UserId::new("2"));
    }
}
