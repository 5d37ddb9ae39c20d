//! The session manager: current principal, mirrored to the store.
//!
//! Explicitly constructed and passed to whoever needs it - there is no
//! module-level singleton. Every transition into `Authenticated` or
//! `Anonymous` mirrors to the session key before returning, so a restart can
//! rebuild the session without contacting the identity provider.

use crate::models::Principal;
use crate::store::{LocalStore, keys};

use super::identity::{AuthError, IdentityResolver};

/// Session lifecycle states.
///
/// `Unresolved` exists only between construction and the first
/// [`SessionManager::restore`]; after that the session is either `Anonymous`
/// or `Authenticated` until the process exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unresolved,
    Anonymous,
    Authenticated(Principal),
}

/// Owns the current session and its persistence.
pub struct SessionManager<'a> {
    store: &'a LocalStore,
    resolver: IdentityResolver<'a>,
    state: SessionState,
}

impl<'a> SessionManager<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore, resolver: IdentityResolver<'a>) -> Self {
        Self {
            store,
            resolver,
            state: SessionState::Unresolved,
        }
    }

    /// One-shot startup transition from the persisted session.
    ///
    /// A present, well-formed principal restores `Authenticated` without
    /// re-validating against the provider; the persisted state is trusted
    /// until explicit logout. Missing or corrupt data restores `Anonymous`
    /// (corrupt data is also cleared so it cannot linger). Calling this again
    /// after the state is resolved is a no-op.
    pub fn restore(&mut self) -> &SessionState {
        if self.state != SessionState::Unresolved {
            return &self.state;
        }

        self.state = match self.store.get::<Principal>(keys::AUTH_USER) {
            Some(principal) => {
                tracing::info!(id = %principal.id, role = %principal.role, "session restored");
                SessionState::Authenticated(principal)
            }
            None => {
                if self.store.contains(keys::AUTH_USER) {
                    tracing::warn!("persisted session unreadable, clearing it");
                    if let Err(err) = self.store.remove(keys::AUTH_USER) {
                        tracing::warn!(%err, "failed to clear unreadable session");
                    }
                }
                SessionState::Anonymous
            }
        };
        &self.state
    }

    /// Authenticate and persist the resulting principal.
    ///
    /// On resolver failure the state is unchanged. A persistence failure does
    /// not fail the login: the in-memory session is still valid, it just will
    /// not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if resolution fails.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let principal = self.resolver.resolve(email, password).await?;

        if let Err(err) = self.store.set(keys::AUTH_USER, &principal) {
            tracing::warn!(%err, "failed to persist session; it will not survive a restart");
        }
        self.state = SessionState::Authenticated(principal.clone());
        Ok(principal)
    }

    /// End the session.
    ///
    /// If the current principal is the admin, provider-side sign-out is
    /// requested best-effort first; a failure there is logged and never
    /// blocks the local transition. Always clears the persisted principal
    /// and moves to `Anonymous`. Idempotent.
    pub async fn logout(&mut self) {
        if self.principal().is_some_and(Principal::is_admin) {
            if let Err(err) = self.resolver.provider().sign_out().await {
                tracing::warn!(%err, "provider sign-out failed, continuing local logout");
            }
        }

        if let Err(err) = self.store.remove(keys::AUTH_USER) {
            tracing::warn!(%err, "failed to clear persisted session");
        }
        self.state = SessionState::Anonymous;
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn principal(&self) -> Option<&Principal> {
        match &self.state {
            SessionState::Authenticated(principal) => Some(principal),
            SessionState::Unresolved | SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }
}
