//! Seed command: install the demo dataset.

use clementine_crm::seed;

use super::{CliError, Context};

/// Install the demo dataset, optionally with a shared demo password.
pub fn install(demo_password: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let summary = seed::install(&ctx.store, demo_password)?;

    tracing::info!(
        "Seeded {} clients, {} products, {} sales, {} credentials",
        summary.clients,
        summary.products,
        summary.sales,
        summary.credentials,
    );
    if demo_password.is_none() {
        tracing::warn!("No demo password given; seeded clients cannot log in");
    }
    Ok(())
}
