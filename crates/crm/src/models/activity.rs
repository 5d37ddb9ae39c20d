//! Activity feed entries derived from the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ClientCreated,
    /// In the vocabulary for completeness; records carry no updated-at
    /// timestamp, so the derived feed never produces it.
    ClientUpdated,
    ProductCreated,
    SaleMade,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}
