//! Client roster records and the admin-form inputs that mutate them.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use clementine_core::{AccountStatus, Email, UserId};

/// One entry in the client directory.
///
/// Carries no role: the `client` role is attached when a record is resolved
/// into a [`crate::models::Principal`]. The matching credential lives in the
/// vault under the lowercased email, not on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a client account.
///
/// The password is required here - an account without a credential could
/// never log in - and is hashed before it touches the store.
#[derive(Debug)]
pub struct NewClient {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: AccountStatus,
    pub password: SecretString,
}

/// Partial update for a client record; `None` fields keep their stored value.
///
/// There is no password field: the admin edit form never changes credentials.
/// An empty string for `phone` or `company` clears the stored value.
#[derive(Debug, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<AccountStatus>,
}
