//! The hosted identity provider boundary.
//!
//! The provider is authoritative for exactly one account: the administrator.
//! Two operations are consumed, password verification and sign-out. The trait
//! exists so the resolver and session manager can run against a mock in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use clementine_core::{Email, UserId};

/// Errors from the provider boundary.
///
/// These never cross the resolver's public contract; callers of `resolve` see
/// one opaque authentication failure regardless of which variant occurred.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, TLS, timeout).
    #[error("provider HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The provider answered 2xx but the body did not match the expected shape.
    #[error("provider response parse error: {0}")]
    Parse(String),
}

/// The identity the provider vouches for after verifying a password.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// Provider-issued user id.
    pub id: UserId,
    /// The account email as the provider knows it.
    pub email: Option<Email>,
    /// Display name from the provider's profile metadata.
    pub display_name: Option<String>,
    /// When the provider account was created.
    pub created_at: DateTime<Utc>,
}

/// External identity provider operations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an email/password pair, returning the verified identity.
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<VerifiedIdentity, ProviderError>;

    /// Revoke the provider-side session established by the last successful
    /// verification, if any.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
