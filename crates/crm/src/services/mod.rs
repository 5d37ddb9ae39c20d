//! Application services over the stores and the hosted identity provider.

pub mod accounts;
pub mod catalog;
pub mod identity;
pub mod metrics;
pub mod session;

pub use accounts::{AccountError, AccountService};
pub use catalog::{CatalogError, CatalogService};
pub use identity::{AuthError, IdentityResolver};
pub use metrics::MetricsService;
pub use session::{SessionManager, SessionState};
