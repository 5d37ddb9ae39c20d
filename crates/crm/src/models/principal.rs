//! The resolved, role-carrying identity a session holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{AccountStatus, Email, Role, UserId};

use super::client::ClientRecord;

/// The authenticated actor.
///
/// This is also the shape persisted under the session key so a restart can
/// rebuild the session without contacting the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl Principal {
    /// Build a client principal from a directory record.
    ///
    /// Field-by-field on purpose: the compiler catches a missing field here,
    /// where a blind struct merge would silently drop it. Phone and company
    /// stay on the record; a principal carries identity, not contact details.
    #[must_use]
    pub fn from_client(record: &ClientRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: Role::Client,
            status: record.status,
            created_at: record.created_at,
        }
    }

    /// Whether this principal is the administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
