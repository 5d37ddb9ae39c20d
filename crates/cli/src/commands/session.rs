//! Session commands: login, logout, whoami.

use clementine_crm::services::SessionState;
use clementine_crm::validate;

use super::{CliError, Context, require_valid};

/// Authenticate and persist the session for later invocations.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    require_valid(validate::login(email, password))?;

    let ctx = Context::open()?;
    let mut session = ctx.session();
    let principal = session.login(email, password).await?;

    tracing::info!(
        "Logged in as {} <{}> ({})",
        principal.name,
        principal.email,
        principal.role
    );
    Ok(())
}

/// End the session, revoking the provider session for the admin.
pub async fn logout() -> Result<(), CliError> {
    let ctx = Context::open()?;
    let mut session = ctx.session();

    if !session.is_authenticated() {
        tracing::info!("Not logged in");
        return Ok(());
    }

    session.logout().await;
    tracing::info!("Logged out");
    Ok(())
}

/// Show the current session.
pub fn whoami() -> Result<(), CliError> {
    let ctx = Context::open()?;
    let mut session = ctx.session();

    match session.restore() {
        SessionState::Authenticated(principal) => {
            tracing::info!(
                "{} <{}> ({}, {}, since {})",
                principal.name,
                principal.email,
                principal.role,
                principal.status,
                principal.created_at.format("%Y-%m-%d")
            );
        }
        SessionState::Unresolved | SessionState::Anonymous => {
            tracing::info!("Not logged in");
        }
    }
    Ok(())
}
