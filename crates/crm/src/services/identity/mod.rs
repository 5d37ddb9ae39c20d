//! Identity resolution: email + password -> [`Principal`].
//!
//! Two paths, chosen by whether the normalized email is the configured
//! administrator address. The admin path delegates to the hosted provider and
//! never consults local data; the client path checks the directory and the
//! credential vault and never contacts the provider.

pub mod hosted;
pub mod provider;

use thiserror::Error;

use clementine_core::{AccountStatus, Email, Role};

use crate::models::Principal;
use crate::store::{ClientDirectory, CredentialVault, LocalStore};

pub use hosted::HostedIdentityClient;
pub use provider::{IdentityProvider, ProviderError, VerifiedIdentity};

/// Opaque authentication failure.
///
/// Unknown email, wrong password, and provider trouble are deliberately
/// indistinguishable here; the distinction goes to the log, not the caller.
#[derive(Debug, Clone, Copy, Error)]
#[error("authentication failed")]
pub struct AuthError;

/// Resolves credentials to a principal.
pub struct IdentityResolver<'a> {
    store: &'a LocalStore,
    provider: &'a dyn IdentityProvider,
    admin_email: &'a str,
}

impl<'a> IdentityResolver<'a> {
    /// `admin_email` must already be lowercased (config does this on load).
    #[must_use]
    pub const fn new(
        store: &'a LocalStore,
        provider: &'a dyn IdentityProvider,
        admin_email: &'a str,
    ) -> Self {
        Self {
            store,
            provider,
            admin_email,
        }
    }

    /// The provider handle, for provider-side sign-out.
    #[must_use]
    pub const fn provider(&self) -> &'a dyn IdentityProvider {
        self.provider
    }

    /// Resolve an email/password pair to a principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on every failure path.
    pub async fn resolve(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let normalized = email.trim().to_lowercase();
        let Ok(normalized) = Email::parse(&normalized) else {
            tracing::debug!("login rejected: unparseable email");
            return Err(AuthError);
        };

        if normalized.as_str() == self.admin_email {
            self.resolve_admin(&normalized, password).await
        } else {
            self.resolve_client(&normalized, password)
        }
    }

    /// Admin path: the provider is the only authority. No local fallback.
    async fn resolve_admin(&self, email: &Email, password: &str) -> Result<Principal, AuthError> {
        match self.provider.verify_credentials(email, password).await {
            Ok(identity) => {
                let name = identity
                    .display_name
                    .filter(|n| !n.is_empty())
                    .or_else(|| identity.email.as_ref().map(|e| e.local_part().to_owned()))
                    .unwrap_or_else(|| "Administrator".to_owned());
                let principal = Principal {
                    id: identity.id,
                    name,
                    email: identity.email.unwrap_or_else(|| email.clone()),
                    role: Role::Admin,
                    status: AccountStatus::Active,
                    created_at: identity.created_at,
                };
                tracing::info!(id = %principal.id, "admin login verified by provider");
                Ok(principal)
            }
            Err(err) => {
                tracing::error!(%err, "admin login failed at provider");
                Err(AuthError)
            }
        }
    }

    /// Client path: first directory record with a matching email wins, then
    /// the vault entry under the normalized email must verify.
    fn resolve_client(&self, email: &Email, password: &str) -> Result<Principal, AuthError> {
        let directory = ClientDirectory::new(self.store);
        let Some(record) = directory
            .load_all()
            .into_iter()
            .find(|r| r.email.eq_ignore_case(email.as_str()))
        else {
            tracing::debug!("login rejected: no directory record");
            return Err(AuthError);
        };

        let vault = CredentialVault::new(self.store);
        let verified = vault
            .load()
            .get(email.as_str())
            .is_some_and(|hash| hash.verify(password));
        if !verified {
            tracing::debug!(id = %record.id, "login rejected: credential mismatch");
            return Err(AuthError);
        }

        tracing::info!(id = %record.id, "client login verified");
        Ok(Principal::from_client(&record))
    }
}
