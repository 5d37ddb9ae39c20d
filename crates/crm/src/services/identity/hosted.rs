//! HTTP client for the hosted identity provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use clementine_core::{Email, UserId};

use crate::config::IdentityConfig;

use super::provider::{IdentityProvider, ProviderError, VerifiedIdentity};

/// Client for the hosted provider's password-grant auth API.
///
/// The access token returned by a successful verification is retained
/// in-process so a later [`IdentityProvider::sign_out`] can revoke it;
/// sign-out with no live token is a no-op.
pub struct HostedIdentityClient {
    client: reqwest::Client,
    base_url: Url,
    access_token: Mutex<Option<String>>,
}

impl HostedIdentityClient {
    /// Build a client from the identity configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the API key is not a valid header value
    /// or the HTTP client fails to build.
    pub fn new(config: &IdentityConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| ProviderError::Parse(format!("invalid API key format: {e}")))?;
        headers.insert("apikey", key);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            access_token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::Parse(format!("invalid endpoint {path}: {e}")))
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentityClient {
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<VerifiedIdentity, ProviderError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.set_query(Some("grant_type=password"));

        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password,
        });

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let grant: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        *self.access_token.lock().await = Some(grant.access_token);

        let user = grant.user;
        Ok(VerifiedIdentity {
            id: UserId::new(user.id),
            email: user.email.as_deref().and_then(|e| Email::parse(e).ok()),
            display_name: user.user_metadata.and_then(|m| m.name),
            created_at: user.created_at,
        })
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let Some(token) = self.access_token.lock().await.take() else {
            return Ok(());
        };

        let url = self.endpoint("auth/v1/logout")?;
        let response = self.client.post(url).bearer_auth(token).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Successful password-grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

/// The user object attached to a grant.
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
    user_metadata: Option<UserMetadata>,
}

/// Profile metadata; only the display name is consumed.
#[derive(Debug, Deserialize)]
struct UserMetadata {
    name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parses_provider_shape() {
        let json = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "user": {
                "id": "6f2a",
                "email": "admin@crm.com",
                "created_at": "2024-01-01T00:00:00Z",
                "user_metadata": { "name": "Admin" }
            }
        }"#;

        let grant: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(grant.access_token, "jwt-token");
        assert_eq!(grant.user.id, "6f2a");
        assert_eq!(grant.user.email.as_deref(), Some("admin@crm.com"));
        assert_eq!(
            grant.user.user_metadata.unwrap().name.as_deref(),
            Some("Admin")
        );
    }

    #[test]
    fn test_token_response_tolerates_missing_metadata() {
        let json = r#"{
            "access_token": "jwt-token",
            "user": {
                "id": "6f2a",
                "email": null,
                "created_at": "2024-01-01T00:00:00Z"
            }
        }"#;

        let grant: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(grant.user.email.is_none());
        assert!(grant.user.user_metadata.is_none());
    }
}
